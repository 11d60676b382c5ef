//! CSV export
//!
//! Writes entries in collection order (newest first). Single-kind exports
//! use the persisted field names as headers; `All` writes one wide table
//! with a leading `kind` column and blanks where a column does not apply.

use crate::format::format_number;
use crate::model::AppState;
use clap::ValueEnum;
use std::io::Write;
use thiserror::Error;

/// Which collection(s) to export
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportKind {
    #[default]
    All,
    #[value(alias = "workout")]
    Workouts,
    #[value(alias = "calorie")]
    Calories,
    #[value(alias = "weight")]
    Weights,
}

/// Export errors
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;

const ALL_HEADERS: [&str; 10] = [
    "kind", "name", "duration", "intensity", "meal", "calories", "time", "weight", "date", "notes",
];

/// Write the selected entries as CSV, returning the number of data rows
pub fn write_csv<W: Write>(state: &AppState, kind: ExportKind, writer: W) -> ExportResult<usize> {
    let mut csv = csv::Writer::from_writer(writer);
    let mut rows = 0;

    match kind {
        ExportKind::Workouts => {
            csv.write_record(["name", "duration", "intensity", "notes"])?;
            for w in &state.workouts {
                csv.write_record([
                    w.name.as_str(),
                    format_number(w.duration).as_str(),
                    w.intensity.as_str(),
                    w.notes.as_str(),
                ])?;
                rows += 1;
            }
        }
        ExportKind::Calories => {
            csv.write_record(["meal", "calories", "time", "date"])?;
            for c in &state.calories {
                csv.write_record([
                    c.meal.as_str(),
                    format_number(c.calories).as_str(),
                    c.time.as_str(),
                    c.date.as_str(),
                ])?;
                rows += 1;
            }
        }
        ExportKind::Weights => {
            csv.write_record(["weight", "date", "notes"])?;
            for w in &state.weights {
                csv.write_record([
                    format_number(w.weight).as_str(),
                    w.date.as_str(),
                    w.notes.as_str(),
                ])?;
                rows += 1;
            }
        }
        ExportKind::All => {
            csv.write_record(ALL_HEADERS)?;
            for w in &state.workouts {
                let duration = format_number(w.duration);
                csv.write_record([
                    "workout",
                    w.name.as_str(),
                    duration.as_str(),
                    w.intensity.as_str(),
                    "",
                    "",
                    "",
                    "",
                    "",
                    w.notes.as_str(),
                ])?;
                rows += 1;
            }
            for c in &state.calories {
                let calories = format_number(c.calories);
                csv.write_record([
                    "calorie",
                    "",
                    "",
                    "",
                    c.meal.as_str(),
                    calories.as_str(),
                    c.time.as_str(),
                    "",
                    c.date.as_str(),
                    "",
                ])?;
                rows += 1;
            }
            for w in &state.weights {
                let weight = format_number(w.weight);
                csv.write_record([
                    "weight",
                    "",
                    "",
                    "",
                    "",
                    "",
                    "",
                    weight.as_str(),
                    w.date.as_str(),
                    w.notes.as_str(),
                ])?;
                rows += 1;
            }
        }
    }

    csv.flush()?;
    tracing::debug!(?kind, rows, "Exported entries");
    Ok(rows)
}
