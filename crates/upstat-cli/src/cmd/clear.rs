//! Remove stale update results before a new update starts

use anyhow::{Context, Result};
use crossterm::style::Stylize;
use upstat_core::ResultStore;

/// Delete all result files in the store.
pub fn clear(store: &ResultStore) -> Result<()> {
    let removed = store
        .clear()
        .context("Failed to clear update results")?;

    tracing::debug!(removed, dir = %store.dir().display(), "Cleared result files");

    let noun = if removed == 1 { "file" } else { "files" };
    println!("{}", format!("Removed {removed} result {noun}").dark_grey());
    Ok(())
}
