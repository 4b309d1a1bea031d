//! `taskboard board` command.

use crate::config::Config;
use crate::context::ServiceContext;
use crate::snapshot::SnapshotStore;

/// Execute the `board` command.
///
/// Loads the board from the backend, or from the local snapshot when
/// `cached` is set, and prints every column with its tasks.
///
/// # Errors
///
/// Returns an error string if the board cannot be loaded, or if `cached` is
/// set without a readable snapshot.
pub async fn run(ctx: &ServiceContext, config: &Config, cached: bool) -> Result<(), String> {
    if cached {
        let Some(path) = &config.snapshot_path else {
            return Err("No snapshot configured. Set TASKBOARD_SNAPSHOT to a file path.".into());
        };
        let store = SnapshotStore::new(ctx.fs.as_ref(), path);
        let Some(board) = store.load()? else {
            return Err(format!("No board snapshot at {}", path.display()));
        };
        super::print_board(&board);
        return Ok(());
    }

    let session = super::load_session(ctx, config).await?;
    super::print_board(session.board());
    Ok(())
}
