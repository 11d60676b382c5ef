//! PulseTrack CLI
//!
//! Command-line front-end for the tracker:
//! - Log workouts, meals and weights
//! - Show the lists and the summary panel
//! - Clear everything
//! - Export CSV
//! - Generate a default config file

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use pulsetrack::config::{generate_default_config, Config, LoggingConfig};
use pulsetrack::{
    compute_summary, write_csv, CalorieForm, DispatchError, DispatchResult, ExportKind,
    KeyValueStore, PersistentStore, RenderedView, SummaryView, SystemClock, Tracker, ViewSink,
    WeightForm, WorkoutForm,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::{
    fmt::MakeWriter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

#[derive(Parser)]
#[command(name = "pulsetrack")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Track workouts, calories and weight locally")]
#[command(long_about = "PulseTrack records workouts, meals and weigh-ins in a local store.\nEvery change is saved immediately and the full overview is printed again.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: <config dir>/pulsetrack/config.toml, then ./pulsetrack.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Data directory (overrides the config file)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Html,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log a workout
    Workout {
        /// Workout name
        #[arg(short, long)]
        name: String,
        /// Duration in minutes
        #[arg(short, long)]
        duration: String,
        /// Intensity (low, medium, high)
        #[arg(short, long, default_value = "medium")]
        intensity: String,
        /// Notes
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Log a meal
    Calories {
        /// Meal name
        #[arg(short, long)]
        meal: String,
        /// Calories
        #[arg(long)]
        calories: String,
        /// Time of day (HH:MM)
        #[arg(short, long, default_value = "")]
        time: String,
    },

    /// Log a weigh-in
    Weight {
        /// Weight in lbs
        #[arg(short, long)]
        weight: String,
        /// Date (default: today). Accepts YYYY-MM-DD or M/D/YYYY
        #[arg(short, long, default_value = "")]
        date: String,
        /// Notes
        #[arg(short, long, default_value = "")]
        notes: String,
    },

    /// Delete every entry
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },

    /// Show all lists and the summary
    Show,

    /// Show only the summary
    Summary,

    /// Export entries as CSV
    Export {
        /// What to export
        #[arg(short, long, value_enum, default_value_t = ExportKind::All)]
        kind: ExportKind,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Prints every rendered view to stdout
struct TerminalView {
    format: OutputFormat,
}

impl ViewSink for TerminalView {
    fn present(&mut self, view: &RenderedView) {
        match self.format {
            OutputFormat::Text => print!("{}", view.to_text()),
            OutputFormat::Html => print!("{}", view.to_html()),
            OutputFormat::Json => match serde_json::to_string_pretty(view) {
                Ok(json) => println!("{}", json),
                Err(e) => tracing::error!("Failed to serialize view: {}", e),
            },
        }
    }
}

type CliTracker = Tracker<Box<dyn KeyValueStore>, TerminalView, SystemClock>;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Config problems are reported before the configured subscriber exists
    let mut config = tracing::subscriber::with_default(bootstrap_subscriber(std::io::stderr), || {
        match &cli.config {
            Some(path) => Config::load_with_env(path),
            None => Ok(Config::load_default()),
        }
    })?;
    if let Some(dir) = &cli.data_dir {
        config.storage.data_dir = dir.to_string_lossy().to_string();
    }

    init_logging(&config.logging);
    tracing::debug!(
        backend = %config.storage.backend,
        data_dir = %config.storage.data_dir,
        "PulseTrack v{}",
        env!("CARGO_PKG_VERSION")
    );

    match cli.command {
        Commands::Workout {
            name,
            duration,
            intensity,
            notes,
        } => {
            let mut tracker = open_tracker(&config, cli.format)?;
            let mut form = WorkoutForm {
                name,
                duration,
                intensity,
                notes,
            };
            report(tracker.submit_workout(&mut form))?;
        }

        Commands::Calories {
            meal,
            calories,
            time,
        } => {
            let mut tracker = open_tracker(&config, cli.format)?;
            let mut form = CalorieForm {
                meal,
                calories,
                time,
            };
            report(tracker.submit_calorie(&mut form))?;
        }

        Commands::Weight {
            weight,
            date,
            notes,
        } => {
            let mut tracker = open_tracker(&config, cli.format)?;
            let mut form = WeightForm {
                weight,
                date,
                notes,
            };
            report(tracker.submit_weight(&mut form))?;
        }

        Commands::Clear { yes } => {
            if !yes {
                eprintln!("This deletes every workout, meal and weigh-in.");
                eprintln!("Re-run with --yes to confirm:");
                eprintln!("  pulsetrack clear --yes");
                std::process::exit(1);
            }
            let mut tracker = open_tracker(&config, cli.format)?;
            report(tracker.clear_all())?;
        }

        Commands::Show => {
            let mut tracker = open_tracker(&config, cli.format)?;
            tracker.refresh();
        }

        Commands::Summary => {
            let tracker = open_tracker(&config, cli.format)?;
            let summary = SummaryView::from(&compute_summary(tracker.state()));

            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
                _ => {
                    println!("Workouts logged: {}", summary.workouts);
                    println!("Calories total:  {}", summary.calories);
                    println!("Latest weight:   {}", summary.weight);
                }
            }
        }

        Commands::Export { kind, output } => {
            let tracker = open_tracker(&config, cli.format)?;

            match output {
                Some(path) => {
                    let file = std::fs::File::create(&path)
                        .with_context(|| format!("creating {:?}", path))?;
                    let rows = write_csv(tracker.state(), kind, file)?;
                    println!("Exported {} entries to {:?}", rows, path);
                }
                None => {
                    write_csv(tracker.state(), kind, std::io::stdout().lock())?;
                }
            }
        }

        Commands::Config { output } => write_config(output.as_deref())?,
    }

    Ok(())
}

fn open_tracker(config: &Config, format: OutputFormat) -> anyhow::Result<CliTracker> {
    let backend = config.storage.open_backend().with_context(|| {
        format!(
            "opening {} storage at {}",
            config.storage.backend, config.storage.data_dir
        )
    })?;
    let store = PersistentStore::with_key(backend, config.storage.key.clone());

    let tracker = Tracker::open(
        store,
        TerminalView { format },
        SystemClock,
        config.input.numeric_policy,
    )?;
    Ok(tracker)
}

/// Rejected input is a user mistake, not a crash
fn report(result: DispatchResult<()>) -> anyhow::Result<()> {
    match result {
        Err(DispatchError::Build(e)) => {
            eprintln!("Entry not saved: {}", e);
            std::process::exit(1);
        }
        other => Ok(other?),
    }
}

fn write_config(output: Option<&Path>) -> anyhow::Result<()> {
    let config = generate_default_config();

    match output {
        Some(path) => {
            // Create parent directory if needed
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)?;
            println!("Config written to {:?}", path);
        }
        None => {
            print!("{}", config);
        }
    }
    Ok(())
}

/// Warn-level subscriber used while the config itself is loading
fn bootstrap_subscriber<W>(writer: W) -> impl tracing::Subscriber + Send + Sync + 'static
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("pulsetrack=warn"))
        .with_writer(writer)
        .finish()
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pulsetrack={}", config.level)));

    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
