//! Cassette configuration for composable per-port replay.

use std::path::{Path, PathBuf};

use super::format::Cassette;
use super::replayer::CassetteReplayer;

/// Per-port cassette file paths. Ports without a cassette path fail with a
/// clear message if called during replay.
#[derive(Debug, Clone, Default)]
pub struct CassetteConfig {
    /// Path to the board API port cassette file.
    pub api: Option<PathBuf>,
    /// Path to the filesystem port cassette file.
    pub fs: Option<PathBuf>,
}

/// Per-port replayers, each with its own interaction stream.
pub struct PortReplayers {
    /// Replayer for the board API port.
    pub api: Option<CassetteReplayer>,
    /// Replayer for the filesystem port.
    pub fs: Option<CassetteReplayer>,
}

/// Path of the cassette for `port` inside a recording directory.
#[must_use]
pub fn port_cassette_path(dir: &Path, port: &str) -> PathBuf {
    dir.join(format!("{port}.cassette.yaml"))
}

impl CassetteConfig {
    /// Points each port at its cassette in a directory written by a
    /// [`RecordingSession`](super::session::RecordingSession). Ports whose
    /// cassette is missing stay unconfigured.
    #[must_use]
    pub fn from_recording_dir(dir: &Path) -> Self {
        let existing = |port: &str| Some(port_cassette_path(dir, port)).filter(|p| p.is_file());
        Self { api: existing("api"), fs: existing("fs") }
    }

    /// Returns a config where all port paths are `None`.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self::default()
    }

    /// Load a cassette file and create a replayer over all its interactions.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_cassette(path: &Path) -> Result<CassetteReplayer, String> {
        Ok(CassetteReplayer::new(&Cassette::load(path)?))
    }

    /// Load all configured per-port cassette files and create replayers.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn load_all(&self) -> Result<PortReplayers, String> {
        Ok(PortReplayers {
            api: self.api.as_deref().map(Self::load_cassette).transpose()?,
            fs: self.fs.as_deref().map(Self::load_cassette).transpose()?,
        })
    }
}
