//! Replaying adapter for the `BoardApi` port.

use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::board::{BoardPayload, StatusUpdate};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{ApiError, ApiFuture, BoardApi, CreatedTask, NewTask};

/// Serves recorded backend responses from a cassette.
pub struct ReplayingBoardApi {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingBoardApi {
    /// Create a replaying client backed by the given replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }

    fn replay<T: serde::de::DeserializeOwned>(&self, method: &str) -> Result<T, ApiError> {
        next_output(&self.replayer, "api", method)
            .and_then(replay_result)
            .map_err(ApiError::Replayed)
    }
}

impl BoardApi for ReplayingBoardApi {
    fn fetch_board(&self) -> ApiFuture<'_, BoardPayload> {
        let result = self.replay("fetch_board");
        Box::pin(async move { result })
    }

    fn update_status(&self, _update: &StatusUpdate) -> ApiFuture<'_, ()> {
        let result = self.replay("update_status");
        Box::pin(async move { result })
    }

    fn create_task(&self, _task: &NewTask) -> ApiFuture<'_, CreatedTask> {
        let result = self.replay("create_task");
        Box::pin(async move { result })
    }
}
