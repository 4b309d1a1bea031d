//! Builds a cassette in memory while a session runs, then writes it once.

use std::path::PathBuf;

use chrono::Utc;
use tracing::debug;

use super::format::{Cassette, Interaction};

/// Accumulates port interactions into a [`Cassette`] bound for `path`.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    cassette: Cassette,
}

impl CassetteRecorder {
    /// Starts an empty cassette named `name` for traffic against `backend`.
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        backend: impl Into<String>,
    ) -> Self {
        let cassette = Cassette {
            name: name.into(),
            recorded_at: Utc::now(),
            backend: backend.into(),
            interactions: Vec::new(),
        };
        Self { path: path.into(), cassette }
    }

    /// Appends one call. Sequence numbers follow recording order.
    pub fn record(
        &mut self,
        port: impl Into<String>,
        method: impl Into<String>,
        input: serde_json::Value,
        output: serde_json::Value,
    ) {
        let interaction = Interaction {
            seq: self.cassette.interactions.len() as u64,
            port: port.into(),
            method: method.into(),
            input,
            output,
        };
        debug!(
            cassette = %self.cassette.name,
            seq = interaction.seq,
            port = %interaction.port,
            method = %interaction.method,
            "recorded interaction"
        );
        self.cassette.interactions.push(interaction);
    }

    /// Calls recorded so far.
    #[must_use]
    pub fn interactions(&self) -> &[Interaction] {
        &self.cassette.interactions
    }

    /// Stamps the cassette with the finishing time and writes it to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn finish(mut self) -> std::io::Result<PathBuf> {
        self.cassette.recorded_at = Utc::now();
        self.cassette.save(&self.path)?;
        Ok(self.path)
    }
}
