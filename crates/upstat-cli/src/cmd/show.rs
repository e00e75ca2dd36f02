//! Show the most recent update result
use anyhow::{Context, Result};
use crossterm::style::Stylize;
use upstat_core::{ResultStore, UpdateResult};
use upstat_schema::timestamp;

/// Print the latest result, or a notice when there is none.
pub fn show(store: &ResultStore, json: bool) -> Result<()> {
    let result = store.read().context("Failed to read update result")?;

    let Some(result) = result else {
        if json {
            println!("null");
        } else {
            println!("{}", "No update result found".dark_grey());
        }
        return Ok(());
    };

    if json {
        println!("{}", upstat_schema::to_string(&result)?);
    } else {
        print_summary(&result);
    }
    Ok(())
}

fn print_summary(result: &UpdateResult) {
    let label_width = 12;

    println!();
    println!("{}", "Last update".dark_grey());
    println!();

    let status = if result.success {
        "Succeeded".green()
    } else {
        "Failed".red()
    };
    println!("{:<width$}{}", "Status:", status, width = label_width);
    if !result.error.is_empty() {
        println!("{:<width$}{}", "Error:", result.error, width = label_width);
    }
    println!(
        "{:<width$}{}",
        "Finished:",
        timestamp::format(&result.timestamp),
        width = label_width
    );
    let version = if result.version_at_end.is_empty() {
        "unknown"
    } else {
        result.version_at_end.as_str()
    };
    println!("{:<width$}{}", "Version:", version, width = label_width);
    println!();
}
