//! Result directory layout.
//!
//! ```text
//! ~/logs/
//! ├── latest-update-result.json            # Most recent result
//! └── 2021-02-10T085735Z-update-result.json # Legacy per-update result
//! ```

use dirs::home_dir;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the result directory.
pub const RESULT_DIR_ENV: &str = "UPSTAT_RESULT_DIR";

/// Name of the file holding the most recent update result.
pub const LATEST_RESULT_FILENAME: &str = "latest-update-result.json";

/// Suffix shared by the latest result file and legacy per-update files.
///
/// Legacy files are prefixed with an ISO-8601 UTC timestamp, so sorting
/// their names sorts them chronologically.
pub const RESULT_FILE_SUFFIX: &str = "-update-result.json";

/// Returns the result directory, or None if the user's home cannot be resolved.
pub fn try_result_dir() -> Option<PathBuf> {
    result_dir_from(std::env::var_os(RESULT_DIR_ENV), home_dir())
}

/// Resolve the result directory from an explicit override and home directory.
///
/// An empty override is treated as unset.
pub fn result_dir_from(override_dir: Option<OsString>, home: Option<PathBuf>) -> Option<PathBuf> {
    match override_dir {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => home.map(|h| h.join("logs")),
    }
}

/// Latest result file inside `dir`: `<dir>/latest-update-result.json`
pub fn latest_result_path(dir: &Path) -> PathBuf {
    dir.join(LATEST_RESULT_FILENAME)
}

/// Glob pattern matching every result file (latest and legacy) in `dir`.
pub fn result_glob_pattern(dir: &Path) -> String {
    let escaped = glob::Pattern::escape(&dir.to_string_lossy());
    format!("{escaped}/*{RESULT_FILE_SUFFIX}")
}
