//! ISO-8601 basic timestamps (`2021-02-10T085735Z`).
//!
//! The time portion carries no separators and the value is always written in
//! UTC. Parsing also accepts a numeric offset (`+0000`, `-0500`) in place of
//! the `Z` suffix and normalizes it to UTC.

use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;

/// Output format: date with separators, time without, literal `Z`.
pub const BASIC_FORMAT: &str = "%Y-%m-%dT%H%M%SZ";

const BASIC_NAIVE_FORMAT: &str = "%Y-%m-%dT%H%M%S";
const BASIC_OFFSET_FORMAT: &str = "%Y-%m-%dT%H%M%S%z";

/// Error returned when a timestamp string is not ISO-8601 basic.
#[derive(Error, Debug)]
#[error("Invalid ISO-8601 timestamp '{input}': {source}")]
pub struct TimestampError {
    /// The rejected input.
    pub input: String,
    /// Underlying chrono parse failure.
    #[source]
    pub source: chrono::ParseError,
}

/// The default timestamp for results that do not carry one.
pub fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

/// Format a UTC timestamp as ISO-8601 basic.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use upstat_schema::timestamp::format;
///
/// let ts = Utc.with_ymd_and_hms(2021, 2, 10, 8, 57, 35).unwrap();
/// assert_eq!(format(&ts), "2021-02-10T085735Z");
/// ```
pub fn format(ts: &DateTime<Utc>) -> String {
    ts.format(BASIC_FORMAT).to_string()
}

/// Parse an ISO-8601 basic timestamp into UTC.
///
/// # Errors
///
/// Returns [`TimestampError`] if `s` matches neither the `Z` form nor the
/// numeric offset form.
pub fn parse(s: &str) -> Result<DateTime<Utc>, TimestampError> {
    let parsed = match s.strip_suffix('Z') {
        Some(naive) => {
            NaiveDateTime::parse_from_str(naive, BASIC_NAIVE_FORMAT).map(|dt| dt.and_utc())
        }
        None => DateTime::parse_from_str(s, BASIC_OFFSET_FORMAT).map(|dt| dt.with_timezone(&Utc)),
    };

    parsed.map_err(|source| TimestampError {
        input: s.to_string(),
        source,
    })
}

/// Serde adapter for `#[serde(with = "upstat_schema::timestamp::basic")]`.
pub mod basic {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize as an ISO-8601 basic string.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format(ts))
    }

    /// Deserialize from an ISO-8601 basic string.
    ///
    /// # Errors
    ///
    /// Fails if the value is not a string or does not parse as a timestamp.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse(&s).map_err(serde::de::Error::custom)
    }
}
