//! The update result record and its JSON encoding.

use std::io::{Read, Write};

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::timestamp;

/// Errors raised while reading or writing an update result.
#[derive(Error, Debug)]
pub enum ResultError {
    /// Reading or writing the underlying stream failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid JSON, or a field has the wrong type
    /// (including an unparsable timestamp).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Outcome of a single update job.
///
/// Written once when the update process finishes and read back later by
/// whatever reports update status. Missing fields decode to their defaults,
/// so `{}` is a valid (failed, undated) result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateResult {
    /// True if the update completed successfully.
    pub success: bool,

    /// Error message for a failed update (empty on success).
    pub error: String,

    /// When the update process completed.
    #[serde(with = "timestamp::basic")]
    pub timestamp: DateTime<Utc>,

    /// Version of the installed code at the end of the update (`versionAtEnd`).
    pub version_at_end: String,
}

impl Default for UpdateResult {
    fn default() -> Self {
        Self {
            success: false,
            error: String::new(),
            timestamp: timestamp::epoch(),
            version_at_end: String::new(),
        }
    }
}

impl UpdateResult {
    /// A successful result stamped with the current time.
    pub fn success(version_at_end: impl Into<String>) -> Self {
        Self {
            success: true,
            error: String::new(),
            timestamp: now(),
            version_at_end: version_at_end.into(),
        }
    }

    /// A failed result stamped with the current time.
    pub fn failure(error: impl Into<String>, version_at_end: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            timestamp: now(),
            version_at_end: version_at_end.into(),
        }
    }

    /// Replace the completion timestamp, dropping any sub-second part.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = whole_seconds(timestamp);
        self
    }
}

/// The wire format has no sub-second field.
fn whole_seconds(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.with_nanosecond(0).unwrap_or(ts)
}

fn now() -> DateTime<Utc> {
    whole_seconds(Utc::now())
}

/// Decode an update result from a JSON stream.
///
/// # Errors
///
/// Returns [`ResultError::Json`] for malformed JSON (including invalid
/// UTF-8), mistyped fields, or an unparsable timestamp. Stream failures are
/// also reported through `serde_json` as [`ResultError::Json`].
pub fn read<R: Read>(reader: R) -> Result<UpdateResult, ResultError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Decode an update result from JSON text.
///
/// # Errors
///
/// See [`read`].
pub fn from_str(s: &str) -> Result<UpdateResult, ResultError> {
    Ok(serde_json::from_str(s)?)
}

/// Decode an update result from JSON bytes.
///
/// # Errors
///
/// See [`read`].
pub fn from_slice(bytes: &[u8]) -> Result<UpdateResult, ResultError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Encode an update result as JSON into `writer`.
///
/// # Errors
///
/// Returns [`ResultError::Json`] if encoding fails and [`ResultError::Io`] if
/// the writer does.
pub fn write<W: Write>(result: &UpdateResult, mut writer: W) -> Result<(), ResultError> {
    let content = to_string(result)?;
    writer.write_all(content.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Encode an update result as a JSON string.
///
/// # Errors
///
/// See [`write`].
pub fn to_string(result: &UpdateResult) -> Result<String, ResultError> {
    Ok(serde_json::to_string(result)?)
}
