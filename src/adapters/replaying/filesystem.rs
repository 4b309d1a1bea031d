//! Replaying adapter for the `FileSystem` port.

use std::path::Path;
use std::sync::Mutex;

use tracing::warn;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::filesystem::{FileSystem, FsResult};

/// Replays recorded filesystem operations from a cassette.
pub struct ReplayingFileSystem {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingFileSystem {
    /// Creates a new replaying filesystem from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl FileSystem for ReplayingFileSystem {
    fn read_to_string(&self, _path: &Path) -> FsResult<String> {
        Ok(next_output(&self.replayer, "fs", "read_to_string").and_then(replay_result)?)
    }

    fn write(&self, _path: &Path, _contents: &str) -> FsResult<()> {
        Ok(next_output(&self.replayer, "fs", "write").and_then(replay_result)?)
    }

    fn exists(&self, path: &Path) -> bool {
        match next_output(&self.replayer, "fs", "exists") {
            Ok(output) => output.as_bool().unwrap_or_else(|| {
                warn!(path = %path.display(), %output, "fs::exists: expected boolean output");
                false
            }),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "fs::exists replay failed");
                false
            }
        }
    }
}
