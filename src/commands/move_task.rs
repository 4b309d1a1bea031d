//! `taskboard move` command.

use std::fmt::Write as _;

use crate::board::{Board, DragEnd, Move};
use crate::config::Config;
use crate::context::ServiceContext;

/// Execute the `move` command.
///
/// Loads the board, drops `task_id` onto `target` (a column key or a task
/// id) and persists the new status. A failed status update prints the
/// warning but still succeeds, since the local board keeps the move.
///
/// # Errors
///
/// Returns an error string if the board cannot be loaded.
pub async fn run(
    ctx: &ServiceContext,
    config: &Config,
    task_id: &str,
    target: &str,
) -> Result<(), String> {
    let mut session = super::load_session(ctx, config).await?;

    let Some(moved) = session.drag_end(&DragEnd::new(task_id, target)).await else {
        println!("Nothing to move: {task_id} onto {target} changes nothing.");
        return Ok(());
    };

    println!("{}", describe(&moved, session.board()));
    if let Some(warning) = session.warning() {
        eprintln!("warning: {warning}");
    }
    Ok(())
}

fn describe(moved: &Move, board: &Board) -> String {
    let column = board.column(moved.to.column);
    let mut out = format!(
        "Moved {} to {} [{}] at position {}.\n",
        moved.task_id,
        column.title,
        column.id,
        moved.to.index + 1
    );
    for task in &column.tasks {
        let _ = writeln!(out, "  {task}");
    }
    out
}
