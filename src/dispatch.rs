//! Event dispatcher
//!
//! `Tracker` owns the state and wires together its collaborators: a
//! persistent store, a view sink and a clock. Every trigger runs the same
//! fixed pipeline:
//!
//! ```text
//! prevent default → build entry → mutate state → reset form → persist → render
//! ```
//!
//! A build failure stops the pipeline before the state is touched. Once the
//! state is mutated, persisting and rendering always follow; a storage
//! failure aborts the handler and is returned to the caller.

use crate::builder::{
    BuildError, CalorieForm, EntryBuilder, NumericPolicy, WeightForm, WorkoutForm,
};
use crate::model::AppState;
use crate::render::{render_all, RenderedView, ViewSink};
use crate::storage::{KeyValueStore, PersistentStore, StorageError, StorageResult};
use chrono::NaiveDate;
use thiserror::Error;

/// Source of "today" for defaulted dates
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Always the same date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// What set the pipeline off, with the form it came from
#[derive(Debug)]
pub enum Trigger<'a> {
    SubmitWorkout(&'a mut WorkoutForm),
    SubmitCalorie(&'a mut CalorieForm),
    SubmitWeight(&'a mut WeightForm),
    ClearAll,
}

impl Trigger<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Trigger::SubmitWorkout(_) => "submit-workout",
            Trigger::SubmitCalorie(_) => "submit-calorie",
            Trigger::SubmitWeight(_) => "submit-weight",
            Trigger::ClearAll => "clear-all",
        }
    }
}

/// A trigger plus its default-action flag
///
/// Form submissions in a browser reload the page unless the default action
/// is prevented; the dispatcher always prevents it.
#[derive(Debug)]
pub struct Event<'a> {
    trigger: Trigger<'a>,
    default_prevented: bool,
}

impl<'a> Event<'a> {
    pub fn new(trigger: Trigger<'a>) -> Self {
        Self {
            trigger,
            default_prevented: false,
        }
    }

    pub fn trigger(&self) -> &Trigger<'a> {
        &self.trigger
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Errors returned by trigger handlers
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Invalid entry: {0}")]
    Build(#[from] BuildError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type alias for dispatcher operations
pub type DispatchResult<T> = Result<T, DispatchError>;

/// The tracker: state container plus its collaborators
pub struct Tracker<S, V, C = SystemClock> {
    state: AppState,
    store: PersistentStore<S>,
    view: V,
    clock: C,
    builder: EntryBuilder,
}

impl<S, V, C> Tracker<S, V, C>
where
    S: KeyValueStore,
    V: ViewSink,
    C: Clock,
{
    /// Restore the state from `store`
    ///
    /// Nothing is rendered yet; call [`Tracker::refresh`] for the initial
    /// view.
    pub fn open(
        store: PersistentStore<S>,
        view: V,
        clock: C,
        policy: NumericPolicy,
    ) -> StorageResult<Self> {
        let state = store.load()?;
        Ok(Self {
            state,
            store,
            view,
            clock,
            builder: EntryBuilder::new(policy),
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn store(&self) -> &PersistentStore<S> {
        &self.store
    }

    /// Run the full pipeline for one event
    pub fn dispatch(&mut self, event: &mut Event<'_>) -> DispatchResult<()> {
        event.prevent_default();
        tracing::debug!(trigger = event.trigger.name(), "Handling trigger");

        match &mut event.trigger {
            Trigger::SubmitWorkout(form) => {
                let entry = self.builder.build_workout(form)?;
                self.state.prepend_workout(entry);
                form.reset();
            }
            Trigger::SubmitCalorie(form) => {
                let entry = self.builder.build_calorie(form, self.clock.today())?;
                self.state.prepend_calorie(entry);
                form.reset();
            }
            Trigger::SubmitWeight(form) => {
                let entry = self.builder.build_weight(form, self.clock.today())?;
                self.state.prepend_weight(entry);
                form.reset();
            }
            Trigger::ClearAll => {
                self.state.clear();
                tracing::info!("Cleared all entries");
            }
        }

        self.store.save(&self.state)?;
        self.refresh();
        Ok(())
    }

    pub fn submit_workout(&mut self, form: &mut WorkoutForm) -> DispatchResult<()> {
        self.dispatch(&mut Event::new(Trigger::SubmitWorkout(form)))
    }

    pub fn submit_calorie(&mut self, form: &mut CalorieForm) -> DispatchResult<()> {
        self.dispatch(&mut Event::new(Trigger::SubmitCalorie(form)))
    }

    pub fn submit_weight(&mut self, form: &mut WeightForm) -> DispatchResult<()> {
        self.dispatch(&mut Event::new(Trigger::SubmitWeight(form)))
    }

    pub fn clear_all(&mut self) -> DispatchResult<()> {
        self.dispatch(&mut Event::new(Trigger::ClearAll))
    }

    /// Render the current state to the view sink without mutating anything
    pub fn refresh(&mut self) -> RenderedView {
        let view = render_all(&self.state);
        self.view.present(&view);
        view
    }
}
