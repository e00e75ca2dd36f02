//! Core library for upstat.
//!
//! Locates the update result directory and manages the result files inside
//! it. The record format itself lives in `upstat-schema`.

pub mod paths;
pub mod store;

pub use paths::*;
pub use store::{ResultStore, StoreError};
pub use upstat_schema::UpdateResult;
