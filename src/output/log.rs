// log.rs - Run log file

use std::fs::File;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::core::{FamilyCounters, FamilyTable};

/// Route `tracing` events to a fresh log file.
///
/// Respects the `BLASTFAM_LOG` environment variable for filtering and
/// defaults to `info`. The file is truncated on every run.
pub fn init_run_log(log_path: &str) -> Result<(), String> {
    super::ensure_parent_dir(log_path)?;
    let file = File::create(log_path)
        .map_err(|e| format!("Failed to create log file '{}': {}", log_path, e))?;

    let filter = EnvFilter::try_from_env("BLASTFAM_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| format!("Failed to initialise log file '{}': {}", log_path, e))
}

/// Log a multi-line block one event per line
pub fn log_block(text: &str) {
    for line in text.lines() {
        tracing::info!("{}", line);
    }
}

pub fn log_table(table: &FamilyTable) {
    tracing::info!("");
    log_block(&table.to_string());
}

/// Per-family final totals followed by the sorted total-count mapping
pub fn log_final_totals(table: &FamilyTable, counters: &FamilyCounters) {
    for row in &table.rows {
        tracing::info!("{} final total count: {}", row.family, row.total);
    }
    tracing::info!("");
    tracing::info!("Total hit counts by family:");
    log_block(&format!("{:#?}", counters.total_counts()));
}
