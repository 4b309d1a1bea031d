//! Command dispatch and handlers.

pub mod board;
pub mod code;
pub mod create;
pub mod move_task;

use crate::board::Board;
use crate::cassette::session::RecordingSession;
use crate::cli::Command;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::session::{BoardSession, LoadState};

/// Dispatch a parsed command to its handler.
///
/// `config.replay_path` serves every port from a cassette, or from the
/// per-port cassettes of a recording directory, instead of the backend.
/// Otherwise, when `config.record_dir` is set, all port interactions are
/// recorded to per-port cassette files in a timestamped directory under it.
///
/// # Errors
///
/// Returns an error string if the context cannot be built or the selected
/// command handler fails.
pub async fn dispatch(command: &Command, config: &Config) -> Result<(), String> {
    // Pure lookups never touch a port.
    if let Command::Code { column } = command {
        return code::run(column);
    }

    let (ctx, session) = if let Some(path) = &config.replay_path {
        (ServiceContext::replaying_at(path)?, None)
    } else if let Some(root) = &config.record_dir {
        let (ctx, session) = ServiceContext::recording_at(root, config)?;
        (ctx, Some(session))
    } else {
        (ServiceContext::live(config)?, None)
    };

    let result = dispatch_with_context(command, &ctx, config).await;

    // Finish recording after the command completes, even on error.
    if let Some(session) = session {
        // The context holds the other recorder references.
        drop(ctx);
        finish_recording(session)?;
    }

    result
}

/// Dispatch a command with the given service context.
async fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
    config: &Config,
) -> Result<(), String> {
    match command {
        Command::Board { cached } => board::run(ctx, config, *cached).await,
        Command::Move { task_id, target } => move_task::run(ctx, config, task_id, target).await,
        Command::Create { title, description, task_type, priority } => {
            let request = crate::ports::NewTask {
                title: title.clone(),
                description: description.clone(),
                task_type: *task_type,
                priority: *priority,
            };
            create::run(ctx, config, &request).await
        }
        Command::Code { column } => code::run(column),
    }
}

/// Load the board, turning a failed load into a command error.
async fn load_session<'a>(
    ctx: &'a ServiceContext,
    config: &Config,
) -> Result<BoardSession<'a>, String> {
    let mut session = BoardSession::from_context(ctx, config);
    if session.load().await == LoadState::Failed {
        let message = session.error().unwrap_or("Could not load the board").to_string();
        return Err(message);
    }
    Ok(session)
}

fn print_board(board: &Board) {
    print!("{board}");
    println!("\n{} task(s) total.", board.task_count());
}

/// Finish a recording session and print the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output_dir = session.finish()?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}
