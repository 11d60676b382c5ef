//! Rendering
//!
//! `render_all` is a pure projection from `AppState` to a view model: one
//! `ListView` per collection and the three summary strings. Every call
//! rebuilds the whole view; whichever UI consumes it may diff or replace.
//!
//! ```text
//! AppState ──render_all──▶ RenderedView ──ViewSink::present──▶ UI
//!                              │
//!                              ├── to_html()  <li> fragments per list
//!                              └── to_text()  terminal rendition
//! ```

use crate::format::format_number;
use crate::model::{AppState, CalorieEntry, WeightEntry, WorkoutEntry};
use crate::summary::{compute_summary, Summary, WEIGHT_UNIT};
use serde::Serialize;
use std::fmt::Write as _;

/// Text of the row shown for an empty list
pub const EMPTY_LIST: &str = "No entries yet.";

/// One row of a list view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Row {
    /// The single row of an empty list
    Placeholder,
    /// One entry: a bold title followed by detail lines
    Entry { title: String, lines: Vec<String> },
}

impl Row {
    /// Render as an `<li>` element; entry text is escaped
    pub fn to_html(&self) -> String {
        match self {
            Row::Placeholder => format!("<li>{}</li>", EMPTY_LIST),
            Row::Entry { title, lines } => {
                let mut html = format!("<li><strong>{}</strong>", escape_html(title));
                for line in lines {
                    let _ = write!(html, "<span>{}</span>", escape_html(line));
                }
                html.push_str("</li>");
                html
            }
        }
    }
}

/// A rendered list, newest entry first
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListView {
    pub rows: Vec<Row>,
}

impl ListView {
    pub fn is_placeholder(&self) -> bool {
        matches!(self.rows.as_slice(), [Row::Placeholder])
    }

    pub fn to_html(&self) -> String {
        self.rows.iter().map(Row::to_html).collect()
    }
}

/// The three summary display fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryView {
    pub workouts: String,
    pub calories: String,
    pub weight: String,
}

impl From<&Summary> for SummaryView {
    fn from(summary: &Summary) -> Self {
        Self {
            workouts: summary.workouts_display(),
            calories: summary.calories_display(),
            weight: summary.weight_display(),
        }
    }
}

/// Everything the UI shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedView {
    pub workouts: ListView,
    pub calories: ListView,
    pub weights: ListView,
    pub summary: SummaryView,
}

impl RenderedView {
    /// HTML page fragment keyed by the element ids the web front-end uses
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for (id, list) in [
            ("workout-list", &self.workouts),
            ("calorie-list", &self.calories),
            ("weight-list", &self.weights),
        ] {
            let _ = writeln!(html, "<ul id=\"{}\">{}</ul>", id, list.to_html());
        }
        for (id, value) in [
            ("summary-workouts", &self.summary.workouts),
            ("summary-calories", &self.summary.calories),
            ("summary-weight", &self.summary.weight),
        ] {
            let _ = writeln!(html, "<span id=\"{}\">{}</span>", id, escape_html(value));
        }
        html
    }

    /// Plain-text rendition for terminals
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for (heading, list) in [
            ("Workouts", &self.workouts),
            ("Calories", &self.calories),
            ("Weight", &self.weights),
        ] {
            let _ = writeln!(text, "{}", heading);
            let _ = writeln!(text, "{}", "-".repeat(heading.len()));
            for row in &list.rows {
                match row {
                    Row::Placeholder => {
                        let _ = writeln!(text, "  {}", EMPTY_LIST);
                    }
                    Row::Entry { title, lines } => {
                        let _ = writeln!(text, "* {}", title);
                        for line in lines {
                            let _ = writeln!(text, "    {}", line);
                        }
                    }
                }
            }
            text.push('\n');
        }

        let _ = writeln!(text, "Workouts logged: {}", self.summary.workouts);
        let _ = writeln!(text, "Calories total:  {}", self.summary.calories);
        let _ = writeln!(text, "Latest weight:   {}", self.summary.weight);
        text
    }
}

/// Project the whole state into a view
pub fn render_all(state: &AppState) -> RenderedView {
    RenderedView {
        workouts: render_list(&state.workouts, workout_row),
        calories: render_list(&state.calories, calorie_row),
        weights: render_list(&state.weights, weight_row),
        summary: SummaryView::from(&compute_summary(state)),
    }
}

fn render_list<T>(items: &[T], template: impl Fn(&T) -> Row) -> ListView {
    let rows = if items.is_empty() {
        vec![Row::Placeholder]
    } else {
        items.iter().map(template).collect()
    };
    ListView { rows }
}

pub fn workout_row(workout: &WorkoutEntry) -> Row {
    Row::Entry {
        title: workout.name.clone(),
        lines: vec![
            format!(
                "{} min · {} intensity",
                format_number(workout.duration),
                workout.intensity
            ),
            workout.notes.clone(),
        ],
    }
}

pub fn calorie_row(entry: &CalorieEntry) -> Row {
    Row::Entry {
        title: entry.meal.clone(),
        lines: vec![
            format!("{} calories · {}", format_number(entry.calories), entry.time),
            entry.date.clone(),
        ],
    }
}

pub fn weight_row(entry: &WeightEntry) -> Row {
    Row::Entry {
        title: format!("{} {}", format_number(entry.weight), WEIGHT_UNIT),
        lines: vec![entry.date.clone(), entry.notes.clone()],
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Receives every freshly rendered view
pub trait ViewSink {
    fn present(&mut self, view: &RenderedView);
}

/// Keeps the most recent view; used by tests and headless callers
#[derive(Debug, Clone, Default)]
pub struct LastFrame {
    frame: Option<RenderedView>,
    renders: usize,
}

impl LastFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame(&self) -> Option<&RenderedView> {
        self.frame.as_ref()
    }

    /// How many times a view was presented
    pub fn renders(&self) -> usize {
        self.renders
    }
}

impl ViewSink for LastFrame {
    fn present(&mut self, view: &RenderedView) {
        self.frame = Some(view.clone());
        self.renders += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Intensity;

    fn sample_state() -> AppState {
        let mut state = AppState::new();
        state.prepend_workout(WorkoutEntry {
            name: "Run".to_string(),
            duration: 30.0,
            intensity: Intensity::Medium,
            notes: "No notes added.".to_string(),
        });
        state.prepend_calorie(CalorieEntry {
            meal: "Oatmeal".to_string(),
            calories: 300.0,
            time: "08:15".to_string(),
            date: "2024-03-01".to_string(),
        });
        state.prepend_weight(WeightEntry {
            weight: 145.0,
            date: "2024-03-01".to_string(),
            notes: "Morning".to_string(),
        });
        state
    }

    #[test]
    fn test_empty_state_renders_placeholders() {
        let view = render_all(&AppState::new());

        for list in [&view.workouts, &view.calories, &view.weights] {
            assert_eq!(list.rows, vec![Row::Placeholder]);
            assert!(list.is_placeholder());
            assert_eq!(list.to_html(), "<li>No entries yet.</li>");
        }
        assert_eq!(view.summary.weight, "--");
        assert_eq!(view.summary.workouts, "0");
    }

    #[test]
    fn test_row_templates() {
        let view = render_all(&sample_state());

        assert_eq!(
            view.workouts.rows,
            vec![Row::Entry {
                title: "Run".to_string(),
                lines: vec![
                    "30 min · medium intensity".to_string(),
                    "No notes added.".to_string()
                ],
            }]
        );
        assert_eq!(
            view.calories.rows,
            vec![Row::Entry {
                title: "Oatmeal".to_string(),
                lines: vec!["300 calories · 08:15".to_string(), "2024-03-01".to_string()],
            }]
        );
        assert_eq!(
            view.weights.rows,
            vec![Row::Entry {
                title: "145 lbs".to_string(),
                lines: vec!["2024-03-01".to_string(), "Morning".to_string()],
            }]
        );
        assert_eq!(view.summary.calories, "300");
        assert_eq!(view.summary.weight, "145 lbs");
    }

    #[test]
    fn test_render_is_idempotent() {
        let state = sample_state();
        let first = render_all(&state);
        let second = render_all(&state);

        assert_eq!(first, second);
        assert_eq!(first.to_html(), second.to_html());
        assert_eq!(first.to_text(), second.to_text());
    }

    #[test]
    fn test_rows_follow_collection_order() {
        let mut state = AppState::new();
        for meal in ["Breakfast", "Lunch"] {
            state.prepend_calorie(CalorieEntry {
                meal: meal.to_string(),
                calories: 100.0,
                time: String::new(),
                date: "2024-03-01".to_string(),
            });
        }

        let titles: Vec<_> = render_all(&state)
            .calories
            .rows
            .into_iter()
            .map(|row| match row {
                Row::Entry { title, .. } => title,
                Row::Placeholder => String::new(),
            })
            .collect();
        assert_eq!(titles, vec!["Lunch", "Breakfast"]);
    }

    #[test]
    fn test_html_escapes_entry_text() {
        let row = Row::Entry {
            title: "<script>alert('x')</script>".to_string(),
            lines: vec!["a & b".to_string()],
        };
        assert_eq!(
            row.to_html(),
            "<li><strong>&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;</strong><span>a &amp; b</span></li>"
        );
    }

    #[test]
    fn test_page_html_ids() {
        let html = render_all(&sample_state()).to_html();
        assert!(html.contains("<ul id=\"workout-list\"><li><strong>Run</strong>"));
        assert!(html.contains("<span id=\"summary-weight\">145 lbs</span>"));
    }

    #[test]
    fn test_nan_shows_in_rows() {
        let mut state = AppState::new();
        state.prepend_calorie(CalorieEntry {
            meal: "Mystery".to_string(),
            calories: f64::NAN,
            time: String::new(),
            date: "2024-03-01".to_string(),
        });

        let view = render_all(&state);
        match &view.calories.rows[0] {
            Row::Entry { lines, .. } => assert_eq!(lines[0], "NaN calories · "),
            Row::Placeholder => panic!("expected an entry row"),
        }
        assert_eq!(view.summary.calories, "NaN");
    }

    #[test]
    fn test_text_rendition() {
        let text = render_all(&AppState::new()).to_text();
        assert!(text.contains("Workouts\n--------\n  No entries yet."));
        assert!(text.contains("Latest weight:   --"));
    }

    #[test]
    fn test_last_frame_sink() {
        let mut sink = LastFrame::new();
        assert!(sink.frame().is_none());

        let view = render_all(&sample_state());
        sink.present(&view);
        sink.present(&view);

        assert_eq!(sink.renders(), 2);
        assert_eq!(sink.frame(), Some(&view));
    }
}
