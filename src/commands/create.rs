//! `taskboard create` command.

use crate::config::Config;
use crate::context::ServiceContext;
use crate::ports::NewTask;

/// Execute the `create` command.
///
/// Loads the board, creates `request` through the backend and appends the
/// stored task to its column.
///
/// # Errors
///
/// Returns an error string if the board cannot be loaded or the task cannot
/// be created or placed.
pub async fn run(ctx: &ServiceContext, config: &Config, request: &NewTask) -> Result<(), String> {
    let mut session = super::load_session(ctx, config).await?;
    let task = session.create(request).await?;
    let column = session.board().column(task.status);
    println!("Created task {task}");
    println!("Added to {} [{}] ({} task(s)).", column.title, column.id, column.tasks.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::recorder::CassetteRecorder;
    use serde_json::json;

    fn replay(outputs: Vec<(&str, serde_json::Value)>) -> (tempfile::TempDir, ServiceContext) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("create.cassette.yaml");
        let mut recorder = CassetteRecorder::new(&path, "create", "n/a");
        for (method, output) in outputs {
            recorder.record("api", method, json!(null), output);
        }
        recorder.finish().unwrap();
        let ctx = ServiceContext::replaying(&path).unwrap();
        (dir, ctx)
    }

    #[tokio::test]
    async fn creates_and_appends() {
        let (_dir, ctx) = replay(vec![
            ("fetch_board", json!({"Ok": {"columns": {}}})),
            ("create_task", json!({"Ok": {"id": 31, "titulo": "Fix login"}})),
        ]);

        let result = run(&ctx, &Config::default(), &NewTask::titled("Fix login")).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn backend_rejection_is_an_error() {
        let (_dir, ctx) = replay(vec![
            ("fetch_board", json!({"Ok": {"columns": {}}})),
            ("create_task", json!({"Err": "backend returned 400: titulo is required"})),
        ]);

        let err = run(&ctx, &Config::default(), &NewTask::titled("")).await.unwrap_err();

        assert!(err.contains("titulo is required"));
    }

    #[tokio::test]
    async fn unknown_returned_status_is_an_error() {
        let (_dir, ctx) = replay(vec![
            ("fetch_board", json!({"Ok": {"columns": {}}})),
            ("create_task", json!({"Ok": {"id": 32, "titulo": "x", "status": "archived"}})),
        ]);

        let err = run(&ctx, &Config::default(), &NewTask::titled("x")).await.unwrap_err();

        assert!(err.contains("archived"));
    }
}
