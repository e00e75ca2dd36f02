//! upstat - inspect and record update results
//!
//! Thin command-line front end over [`upstat_core::ResultStore`].
#![allow(clippy::missing_errors_doc)]

pub mod cmd;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use upstat_core::{ResultStore, StoreError};

/// Top-level command line.
#[derive(Debug, Parser)]
#[command(name = "upstat")]
#[command(author, version, about = "upstat - inspect and record update results")]
pub struct Cli {
    /// Directory holding update result files (default: $UPSTAT_RESULT_DIR or ~/logs)
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the most recent update result
    Show {
        /// Print the raw JSON record instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Record the result of a finished update
    Record {
        /// The update succeeded
        #[arg(long, conflicts_with = "error", required_unless_present = "error")]
        success: bool,
        /// The update failed with this message
        #[arg(long)]
        error: Option<String>,
        /// Version installed at the end of the update
        #[arg(long = "version-at-end", default_value = "")]
        version_at_end: String,
        /// Completion time in ISO-8601 basic form (default: now)
        #[arg(long, value_parser = upstat_schema::timestamp::parse)]
        timestamp: Option<DateTime<Utc>>,
    },
    /// Delete all update result files
    Clear,
    /// Print the path of the latest result file
    Path,
}

impl Cli {
    /// Result store selected by `--dir`, falling back to
    /// [`ResultStore::open_default`], which reads the environment.
    ///
    /// # Errors
    ///
    /// Fails if no directory was given and none can be resolved.
    pub fn store(&self) -> Result<ResultStore, StoreError> {
        match &self.dir {
            Some(dir) => Ok(ResultStore::new(dir)),
            None => ResultStore::open_default(),
        }
    }
}
