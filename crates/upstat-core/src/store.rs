//! Persistent store for the result of the most recent update.
//!
//! Nothing about an update is kept in memory between processes, so the
//! updater and the status reporter communicate through files:
//!
//! 1. Before an update starts, [`ResultStore::clear`] removes old results.
//! 2. When the update finishes, the updater calls [`ResultStore::save`].
//! 3. Status queries call [`ResultStore::read`]; while no result exists the
//!    update is either still running or never happened.
//!
//! Older updaters wrote one file per update, named
//! `<timestamp>-update-result.json`. Those are still read when no
//! `latest-update-result.json` exists.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use glob::MatchOptions;
use thiserror::Error;
use tracing::{debug, info};
use upstat_schema::{ResultError, UpdateResult};

use crate::paths;

/// Errors from reading, writing, or clearing result files.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem failure outside of result decoding.
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        /// File or directory being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A result file exists but could not be decoded or encoded.
    #[error("Invalid result file {}: {source}", .path.display())]
    Result {
        /// The offending file.
        path: PathBuf,
        /// Underlying decode/encode error.
        #[source]
        source: ResultError,
    },

    /// The result file pattern for the directory is not a valid glob.
    #[error("Invalid result file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Neither the override variable nor a home directory is available.
    #[error("Could not determine result directory. Set {} to override.", paths::RESULT_DIR_ENV)]
    NoHomeDir,
}

impl StoreError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn result(path: &Path, source: ResultError) -> Self {
        Self::Result {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result files inside a single directory.
#[derive(Debug, Clone)]
pub struct ResultStore {
    dir: PathBuf,
}

impl ResultStore {
    /// Store rooted at `dir`. The directory does not need to exist yet.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store at the default location (`$UPSTAT_RESULT_DIR` or `~/logs`).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoHomeDir`] if no directory can be resolved.
    pub fn open_default() -> Result<Self, StoreError> {
        paths::try_result_dir()
            .map(Self::new)
            .ok_or(StoreError::NoHomeDir)
    }

    /// Directory holding the result files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the latest result file.
    pub fn latest_path(&self) -> PathBuf {
        paths::latest_result_path(&self.dir)
    }

    /// Read the most recent update result.
    ///
    /// Returns `Ok(None)` if neither the latest file nor any legacy file
    /// exists.
    ///
    /// # Errors
    ///
    /// Fails if a result file exists but cannot be read or decoded.
    pub fn read(&self) -> Result<Option<UpdateResult>, StoreError> {
        let latest = self.latest_path();
        match File::open(&latest) {
            Ok(file) => read_file(&latest, file).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %latest.display(), "No latest result, checking legacy files");
                self.read_legacy()
            }
            Err(e) => Err(StoreError::io(&latest, e)),
        }
    }

    fn read_legacy(&self) -> Result<Option<UpdateResult>, StoreError> {
        // Names start with a timestamp, so the greatest name is the newest.
        let Some(newest) = self.result_files()?.pop() else {
            return Ok(None);
        };

        debug!(path = %newest.display(), "Reading legacy result file");
        let file = File::open(&newest).map_err(|e| StoreError::io(&newest, e))?;
        read_file(&newest, file).map(Some)
    }

    /// Delete every result file, latest and legacy.
    ///
    /// Returns the number of files removed. A missing directory removes
    /// nothing.
    ///
    /// # Errors
    ///
    /// Fails if a matching file cannot be removed.
    pub fn clear(&self) -> Result<usize, StoreError> {
        let files = self.result_files()?;
        for path in &files {
            debug!(path = %path.display(), "Removing result file");
            fs::remove_file(path).map_err(|e| StoreError::io(path, e))?;
        }
        Ok(files.len())
    }

    /// Write `result` as the latest result, creating the directory if needed.
    ///
    /// Returns the path written.
    ///
    /// # Errors
    ///
    /// Fails if the directory or file cannot be created or written.
    pub fn save(&self, result: &UpdateResult) -> Result<PathBuf, StoreError> {
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::io(&self.dir, e))?;

        let path = self.latest_path();
        info!(path = %path.display(), "Writing result file");

        let file = File::create(&path).map_err(|e| StoreError::io(&path, e))?;
        upstat_schema::write(result, BufWriter::new(file))
            .map_err(|e| StoreError::result(&path, e))?;
        Ok(path)
    }

    /// All result files in the directory, sorted by name.
    fn result_files(&self) -> Result<Vec<PathBuf>, StoreError> {
        // Hidden files never count as results.
        let options = MatchOptions {
            require_literal_leading_dot: true,
            ..MatchOptions::new()
        };
        let pattern = paths::result_glob_pattern(&self.dir);

        let mut files = glob::glob_with(&pattern, options)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                let path = e.path().to_path_buf();
                StoreError::Io {
                    path,
                    source: e.into_error(),
                }
            })?;
        files.retain(|p| p.is_file());
        files.sort();
        Ok(files)
    }
}

fn read_file(path: &Path, file: File) -> Result<UpdateResult, StoreError> {
    upstat_schema::read(BufReader::new(file)).map_err(|e| StoreError::result(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    fn sample(version: &str) -> UpdateResult {
        UpdateResult::success(version)
            .with_timestamp(Utc.with_ymd_and_hms(2021, 2, 10, 8, 57, 35).unwrap())
    }

    fn write_raw(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_read_empty_dir_is_none() {
        let dir = tempdir().unwrap();
        let store = ResultStore::new(dir.path());
        assert!(store.read().unwrap().is_none());
    }

    #[test]
    fn test_read_missing_dir_is_none() {
        let dir = tempdir().unwrap();
        let store = ResultStore::new(dir.path().join("does-not-exist"));
        assert!(store.read().unwrap().is_none());
        assert_eq!(store.clear().unwrap(), 0);
    }

    #[test]
    fn test_save_then_read_roundtrip() {
        let dir = tempdir().unwrap();
        let store = ResultStore::new(dir.path().join("logs"));

        let result = sample("1.4.2");
        let path = store.save(&result).unwrap();

        assert_eq!(path, dir.path().join("logs").join(paths::LATEST_RESULT_FILENAME));
        assert_eq!(store.read().unwrap(), Some(result));
    }

    #[test]
    fn test_save_overwrites_previous_result() {
        let dir = tempdir().unwrap();
        let store = ResultStore::new(dir.path());

        store.save(&sample("1.4.1")).unwrap();
        store
            .save(&UpdateResult::failure("disk full", "1.4.1"))
            .unwrap();

        let read = store.read().unwrap().unwrap();
        assert!(!read.success);
        assert_eq!(read.error, "disk full");
    }

    #[test]
    fn test_legacy_fallback_picks_newest() {
        let dir = tempdir().unwrap();
        write_raw(
            dir.path(),
            "2021-01-05T101010Z-update-result.json",
            r#"{"success": false, "error": "old", "versionAtEnd": "1.4.0"}"#,
        );
        write_raw(
            dir.path(),
            "2021-02-10T085735Z-update-result.json",
            r#"{"success": true, "timestamp": "2021-02-10T085735Z", "versionAtEnd": "1.4.1"}"#,
        );

        let store = ResultStore::new(dir.path());
        let result = store.read().unwrap().unwrap();
        assert!(result.success);
        assert_eq!(result.version_at_end, "1.4.1");
    }

    #[test]
    fn test_latest_wins_over_legacy() {
        let dir = tempdir().unwrap();
        write_raw(
            dir.path(),
            "2099-01-01T000000Z-update-result.json",
            r#"{"versionAtEnd": "legacy"}"#,
        );

        let store = ResultStore::new(dir.path());
        store.save(&sample("1.4.2")).unwrap();

        assert_eq!(store.read().unwrap().unwrap().version_at_end, "1.4.2");
    }

    #[test]
    fn test_read_reports_corrupt_file() {
        let dir = tempdir().unwrap();
        write_raw(dir.path(), paths::LATEST_RESULT_FILENAME, "{not json");

        let store = ResultStore::new(dir.path());
        let err = store.read().unwrap_err();
        assert!(matches!(err, StoreError::Result { .. }));
    }

    #[test]
    fn test_hidden_result_files_are_ignored() {
        let dir = tempdir().unwrap();
        write_raw(dir.path(), ".x-update-result.json", "");

        let store = ResultStore::new(dir.path());
        assert!(store.read().unwrap().is_none());
        assert_eq!(store.clear().unwrap(), 0);
        assert!(dir.path().join(".x-update-result.json").exists());
    }

    #[test]
    fn test_pattern_error_keeps_source() {
        let err = StoreError::from(glob::Pattern::new("[").unwrap_err());
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("Invalid result file pattern"));
    }

    #[test]
    fn test_clear_removes_only_result_files() {
        let dir = tempdir().unwrap();
        let store = ResultStore::new(dir.path());

        store.save(&sample("1.4.2")).unwrap();
        write_raw(dir.path(), "2021-01-05T101010Z-update-result.json", "{}");
        write_raw(dir.path(), "update.log", "unrelated");

        assert_eq!(store.clear().unwrap(), 2);
        assert!(store.read().unwrap().is_none());
        assert!(dir.path().join("update.log").exists());
    }
}
