//! Recording adapter for the `FileSystem` port.

use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::{record_interaction, record_result};
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::filesystem::{FileSystem, FsResult};

/// Snapshot file access that is written to a cassette as it happens.
pub struct RecordingFileSystem {
    inner: Box<dyn FileSystem>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingFileSystem {
    /// Wraps `inner`, recording to `recorder` under the `fs` port.
    pub fn new(inner: Box<dyn FileSystem>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }

    fn record<T: Serialize>(&self, method: &str, path: &Path, result: &FsResult<T>) {
        let input = FsInput { path: path.display().to_string(), bytes: None };
        record_result(&self.recorder, "fs", method, &input, result);
    }
}

/// Cassette input for filesystem calls. Snapshot contents are summarized by
/// size to keep cassettes small.
#[derive(Serialize)]
struct FsInput {
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    bytes: Option<usize>,
}

impl FileSystem for RecordingFileSystem {
    fn read_to_string(&self, path: &Path) -> FsResult<String> {
        let result = self.inner.read_to_string(path);
        self.record("read_to_string", path, &result);
        result
    }

    fn write(&self, path: &Path, contents: &str) -> FsResult<()> {
        let result = self.inner.write(path, contents);
        let input = FsInput { path: path.display().to_string(), bytes: Some(contents.len()) };
        record_result(&self.recorder, "fs", "write", &input, &result);
        result
    }

    fn exists(&self, path: &Path) -> bool {
        let found = self.inner.exists(path);
        let input = FsInput { path: path.display().to_string(), bytes: None };
        record_interaction(&self.recorder, "fs", "exists", &input, &found);
        found
    }
}
