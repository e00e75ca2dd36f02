//! Shared types and wire format for update results.
//!
//! An update job finishes by writing a small JSON document:
//!
//! ```text
//! {
//!   "success": true,
//!   "error": "",
//!   "timestamp": "2021-02-10T085735Z",
//!   "versionAtEnd": "1.4.2"
//! }
//! ```
//!
//! [`UpdateResult`] is the in-memory form of that document.

pub mod result;
pub mod timestamp;

// Re-exports
pub use result::{ResultError, UpdateResult, from_slice, from_str, read, to_string, write};
pub use timestamp::TimestampError;
