//! Filesystem port used by the board snapshot.

use std::path::Path;

/// Result of a filesystem call.
pub type FsResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Whole-file access to local storage.
///
/// The snapshot only ever reads, replaces or probes a single file, so the
/// port is limited to those three calls.
pub trait FileSystem: Send + Sync {
    /// Reads a whole UTF-8 file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable or not UTF-8.
    fn read_to_string(&self, path: &Path) -> FsResult<String>;

    /// Replaces the file at `path` with `contents`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn write(&self, path: &Path, contents: &str) -> FsResult<()>;

    /// Whether anything exists at `path`.
    fn exists(&self, path: &Path) -> bool;
}
