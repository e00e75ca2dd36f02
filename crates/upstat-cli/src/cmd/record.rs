//! Record the result of a finished update

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use crossterm::style::Stylize;
use upstat_core::{ResultStore, UpdateResult};

/// Save a new latest result. `error` of `None` records a success.
pub fn record(
    store: &ResultStore,
    error: Option<String>,
    version_at_end: String,
    timestamp: Option<DateTime<Utc>>,
) -> Result<()> {
    let mut result = match error {
        Some(msg) => UpdateResult::failure(msg, version_at_end),
        None => UpdateResult::success(version_at_end),
    };
    if let Some(ts) = timestamp {
        result = result.with_timestamp(ts);
    }

    let path = store
        .save(&result)
        .context("Failed to save update result")?;

    let outcome = if result.success {
        "success".green()
    } else {
        "failure".red()
    };
    println!("Recorded {outcome} to {}", path.display());
    Ok(())
}
