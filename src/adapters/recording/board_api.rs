//! Recording adapter for the `BoardApi` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::board::{BoardPayload, StatusUpdate};
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{ApiFuture, BoardApi, CreatedTask, NewTask};

/// Records backend interactions while delegating to an inner implementation.
pub struct RecordingBoardApi {
    inner: Box<dyn BoardApi>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingBoardApi {
    /// Creates a new recording client wrapping the given implementation.
    #[must_use]
    pub fn new(inner: Box<dyn BoardApi>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

/// Cassette input for `update_status`; the task id is not part of the body.
#[derive(Serialize)]
struct UpdateInput<'a> {
    task_id: &'a str,
    #[serde(rename = "estadoId")]
    estado_id: u8,
}

impl BoardApi for RecordingBoardApi {
    fn fetch_board(&self) -> ApiFuture<'_, BoardPayload> {
        Box::pin(async move {
            let result = self.inner.fetch_board().await;
            record_result(&self.recorder, "api", "fetch_board", &(), &result);
            result
        })
    }

    fn update_status(&self, update: &StatusUpdate) -> ApiFuture<'_, ()> {
        let update = update.clone();
        Box::pin(async move {
            let result = self.inner.update_status(&update).await;
            let input = UpdateInput { task_id: &update.task_id, estado_id: update.estado_id };
            record_result(&self.recorder, "api", "update_status", &input, &result);
            result
        })
    }

    fn create_task(&self, task: &NewTask) -> ApiFuture<'_, CreatedTask> {
        let task = task.clone();
        Box::pin(async move {
            let result = self.inner.create_task(&task).await;
            record_result(&self.recorder, "api", "create_task", &task, &result);
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::replaying::ReplayingBoardApi;
    use crate::cassette::format::Cassette;
    use crate::cassette::replayer::CassetteReplayer;
    use crate::ports::ApiError;
    use serde_json::json;

    /// Backend stub that accepts every status update and refuses creation.
    struct StubApi;

    impl BoardApi for StubApi {
        fn fetch_board(&self) -> ApiFuture<'_, BoardPayload> {
            Box::pin(async { Ok(BoardPayload::default()) })
        }

        fn update_status(&self, _update: &StatusUpdate) -> ApiFuture<'_, ()> {
            Box::pin(async { Ok(()) })
        }

        fn create_task(&self, _task: &NewTask) -> ApiFuture<'_, CreatedTask> {
            Box::pin(async { Err(ApiError::Status { status: 400, message: "bad".into() }) })
        }
    }

    #[tokio::test]
    async fn recorded_calls_replay_identically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api.cassette.yaml");
        let recorder =
            Arc::new(Mutex::new(CassetteRecorder::new(&path, "test", "http://localhost:8080")));

        {
            let api = RecordingBoardApi::new(Box::new(StubApi), Arc::clone(&recorder));
            api.update_status(&StatusUpdate { task_id: "9".into(), estado_id: 5 }).await.unwrap();
            assert!(api.create_task(&NewTask::titled("x")).await.is_err());
        }

        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        recorder.finish().unwrap();

        let cassette = Cassette::load(&path).unwrap();
        assert_eq!(cassette.interactions[0].input, json!({"task_id": "9", "estadoId": 5}));
        assert_eq!(cassette.interactions[0].output, json!({"Ok": null}));
        assert_eq!(cassette.interactions[1].output, json!({"Err": "backend returned 400: bad"}));

        let replay = ReplayingBoardApi::new(CassetteReplayer::new(&cassette));
        replay.update_status(&StatusUpdate { task_id: "9".into(), estado_id: 5 }).await.unwrap();
        let err = replay.create_task(&NewTask::titled("x")).await.unwrap_err();
        assert_eq!(err.to_string(), "backend returned 400: bad");
    }
}
