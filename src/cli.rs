//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::board::{Priority, TaskType};

/// Top-level CLI parser for `taskboard`.
#[derive(Debug, Parser)]
#[command(name = "taskboard", version, about = "Inspect and rearrange the task board")]
pub struct Cli {
    /// Log backend calls and board changes to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print every column with its tasks.
    Board {
        /// Read the local snapshot instead of the backend.
        #[arg(long)]
        cached: bool,
    },
    /// Drop a task onto a column or onto another task.
    Move {
        /// Task being moved.
        task_id: String,
        /// Column key (appends) or task id (inserts before it).
        target: String,
    },
    /// Create a task in the backend and add it to the board.
    Create {
        /// Task title.
        #[arg(long)]
        title: String,
        /// Task description.
        #[arg(long)]
        description: Option<String>,
        /// Kind of work item.
        #[arg(long = "type", default_value_t = TaskType::Task)]
        task_type: TaskType,
        /// Priority.
        #[arg(long, default_value_t = Priority::Medium)]
        priority: Priority,
    },
    /// Print the backend status code for a column key.
    Code {
        /// Column key, e.g. `inProgress`.
        column: String,
    },
}
