//! Local board snapshot.
//!
//! The whole board is written as pretty JSON in the bulk payload shape
//! (`{"columns": {...}}`) and read back through [`Board::load`], so a
//! snapshot edited by hand still yields a board that keeps its invariants.
//! All I/O goes through the `FileSystem` port.

use std::path::{Path, PathBuf};

use crate::board::{Board, BoardPayload};
use crate::ports::FileSystem;

/// Reads and writes the board snapshot file.
pub struct SnapshotStore<'a> {
    fs: &'a dyn FileSystem,
    path: PathBuf,
}

impl<'a> SnapshotStore<'a> {
    /// Creates a store for the snapshot at `path`.
    #[must_use]
    pub fn new(fs: &'a dyn FileSystem, path: &Path) -> Self {
        Self { fs, path: path.to_path_buf() }
    }

    /// Location of the snapshot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrites the snapshot with `board`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, board: &Board) -> Result<(), String> {
        let json = serde_json::to_string_pretty(&board.to_payload())
            .map_err(|e| format!("Failed to serialize board snapshot: {e}"))?;
        self.fs
            .write(&self.path, &json)
            .map_err(|e| format!("Failed to write board snapshot {}: {e}", self.path.display()))
    }

    /// Reads the snapshot, or `None` if no snapshot has been written yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Option<Board>, String> {
        if !self.fs.exists(&self.path) {
            return Ok(None);
        }
        let contents = self
            .fs
            .read_to_string(&self.path)
            .map_err(|e| format!("Failed to read board snapshot {}: {e}", self.path.display()))?;
        let payload: BoardPayload = serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse board snapshot {}: {e}", self.path.display()))?;
        Board::load(&payload)
            .map(Some)
            .map_err(|e| format!("Invalid board snapshot {}: {e}", self.path.display()))
    }
}
