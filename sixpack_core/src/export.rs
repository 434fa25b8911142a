//! CSV export of a user's progress through the program.

use crate::program::{get_default_program, is_recovery_day};
use crate::store::ProgressStore;
use crate::types::UserId;
use crate::Result;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    day: u32,
    title: String,
    recovery: bool,
    completed: bool,
    completed_at: Option<String>,
}

/// Write one row per program day to `csv_path`, returning the rows written
///
/// The file is replaced on every export.
pub fn export_progress(
    store: &impl ProgressStore,
    user: &UserId,
    csv_path: &Path,
) -> Result<usize> {
    let log = store.completion_log(user)?;

    if let Some(parent) = csv_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(csv_path)?;

    let mut count = 0;
    for workout in get_default_program() {
        let completed_at = log.get(&workout.day_number);
        writer.serialize(CsvRow {
            day: workout.day_number,
            title: workout.title.clone(),
            recovery: is_recovery_day(workout.day_number),
            completed: completed_at.is_some(),
            completed_at: completed_at.map(|t| t.to_rfc3339()),
        })?;
        count += 1;
    }

    writer.flush()?;
    tracing::info!("Exported {} days of progress to {:?}", count, csv_path);
    Ok(count)
}
