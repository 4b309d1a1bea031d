//! In-memory Kanban board: tasks grouped into ordered status columns.
//!
//! A [`Board`] is a plain value. Every change goes through a function that
//! takes the current board and yields the next one (see [`Board::reconcile`]),
//! or through the bulk [`Board::load`] and [`Board::append`] entry points.
//! All of them keep two invariants:
//!
//! - every task id appears in exactly one column;
//! - a task's `status` always equals the id of the column holding it.

mod reconcile;
mod status;
mod task;

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

pub use reconcile::{DragEnd, Move, Position, StatusUpdate};
pub use status::{status_code_of, Status, FALLBACK_STATUS};
pub use task::{Assignee, Priority, Task, TaskType};
pub(crate) use task::id_from_string_or_number as task_id_from_string_or_number;

/// Model violations surfaced by [`Board`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// A status or column key does not name any known column.
    #[error("unknown column '{0}'")]
    UnknownColumn(String),
    /// The task id is already present somewhere on the board.
    #[error("task '{0}' is already on the board")]
    DuplicateTask(String),
}

/// An ordered bucket of tasks sharing one workflow status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// The status this column represents.
    pub id: Status,
    /// Display label.
    pub title: String,
    /// Tasks top to bottom.
    pub tasks: Vec<Task>,
}

impl Column {
    /// Creates an empty column for `status` with its default title.
    #[must_use]
    pub fn empty(status: Status) -> Self {
        Self { id: status, title: status.title().to_string(), tasks: Vec::new() }
    }

    fn position_of(&self, task_id: &str) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == task_id)
    }
}

/// Bulk board payload exchanged with the backend and the local snapshot.
///
/// Shape: `{ "columns": { "<columnKey>": [Task, ...] } }`. Values are kept as
/// raw JSON so that entries under unknown keys are dropped without having to
/// decode them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardPayload {
    /// Task arrays keyed by column key.
    #[serde(default)]
    pub columns: BTreeMap<String, serde_json::Value>,
}

/// The complete set of columns at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    columns: Vec<Column>,
}

impl Default for Board {
    fn default() -> Self {
        Self { columns: Status::ALL.iter().copied().map(Column::empty).collect() }
    }
}

impl Board {
    /// Builds a board from a bulk payload, replacing everything.
    ///
    /// Unknown column keys are ignored and known keys missing from the
    /// payload stay empty. Each task takes the status of the column it was
    /// listed under. A task id already seen in an earlier column is dropped,
    /// and so is a record that is not a task at all (no id); the rest of the
    /// board still loads.
    ///
    /// # Errors
    ///
    /// Returns an error if a known column key does not hold an array.
    pub fn load(payload: &BoardPayload) -> Result<Self, serde_json::Error> {
        let mut board = Self::default();
        let mut seen = HashSet::new();

        for (key, value) in &payload.columns {
            let Some(status) = Status::from_key(key) else {
                warn!(column = %key, "ignoring unknown column in board payload");
                continue;
            };
            let records: Vec<serde_json::Value> = serde_json::from_value(value.clone())?;
            let column = board.column_mut(status);
            for record in records {
                let mut task: Task = match serde_json::from_value(record) {
                    Ok(task) => task,
                    Err(e) => {
                        warn!(column = %key, error = %e, "dropping unreadable task in board payload");
                        continue;
                    }
                };
                if !seen.insert(task.id.clone()) {
                    warn!(task = %task.id, column = %key, "dropping duplicate task in board payload");
                    continue;
                }
                task.status = status;
                column.tasks.push(task);
            }
        }

        Ok(board)
    }

    /// Converts the board back into the bulk payload shape.
    #[must_use]
    pub fn to_payload(&self) -> BoardPayload {
        let columns = self
            .columns
            .iter()
            .map(|column| {
                let tasks = serde_json::to_value(&column.tasks)
                    .unwrap_or_else(|_| serde_json::Value::Array(Vec::new()));
                (column.id.key().to_string(), tasks)
            })
            .collect();
        BoardPayload { columns }
    }

    /// Appends a task to the end of the column matching its status.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::DuplicateTask`] if a task with the same id is
    /// already on the board.
    pub fn append(&mut self, task: Task) -> Result<(), BoardError> {
        if self.locate(&task.id).is_some() {
            return Err(BoardError::DuplicateTask(task.id));
        }
        self.column_mut(task.status).tasks.push(task);
        Ok(())
    }

    /// Columns in rendering order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The column for `status`.
    #[must_use]
    pub fn column(&self, status: Status) -> &Column {
        &self.columns[status.index()]
    }

    fn column_mut(&mut self, status: Status) -> &mut Column {
        &mut self.columns[status.index()]
    }

    /// Finds the column and index holding `task_id`.
    #[must_use]
    pub fn locate(&self, task_id: &str) -> Option<Position> {
        self.columns.iter().find_map(|column| {
            column.position_of(task_id).map(|index| Position { column: column.id, index })
        })
    }

    /// Looks up a task by id.
    #[must_use]
    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.locate(task_id).map(|pos| &self.column(pos.column).tasks[pos.index])
    }

    /// Total number of tasks across all columns.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|column| column.tasks.len()).sum()
    }

    /// Iterates over every task, column by column.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.columns.iter().flat_map(|column| column.tasks.iter())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for column in &self.columns {
            writeln!(f, "{} [{}] ({})", column.title, column.id, column.tasks.len())?;
            for task in &column.tasks {
                writeln!(f, "  {task}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> BoardPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn default_board_has_every_column_empty_in_order() {
        let board = Board::default();
        let ids: Vec<Status> = board.columns().iter().map(|c| c.id).collect();
        assert_eq!(ids, Status::ALL.to_vec());
        assert_eq!(board.task_count(), 0);
        assert_eq!(board.column(Status::Review).title, "En Revisión");
    }

    #[test]
    fn load_ignores_unknown_keys_and_leaves_missing_columns_empty() {
        let board = Board::load(&payload(json!({
            "columns": {
                "todo": [
                    {"id": 1, "title": "a", "type": "task", "priority": "high", "status": "todo"},
                    {"id": 2, "title": "b", "type": "bug", "priority": "low", "status": "todo"},
                    {"id": 3, "title": "c", "type": "story", "priority": "medium", "status": "todo"}
                ],
                "bogusKey": [{"id": 4}, {"id": 5}]
            }
        })))
        .unwrap();

        assert_eq!(board.column(Status::Todo).tasks.len(), 3);
        assert_eq!(board.task_count(), 3);
        for status in Status::ALL.iter().copied().filter(|s| *s != Status::Todo) {
            assert!(board.column(status).tasks.is_empty(), "{status} should be empty");
        }
        assert!(board.task("4").is_none());
    }

    #[test]
    fn load_takes_status_from_the_column_key() {
        let board = Board::load(&payload(json!({
            "columns": {
                "done": [{"id": "ORA-9", "title": "x", "type": "task", "priority": "medium", "status": "todo"}]
            }
        })))
        .unwrap();

        assert_eq!(board.task("ORA-9").unwrap().status, Status::Done);
    }

    #[test]
    fn load_drops_duplicate_ids() {
        let board = Board::load(&payload(json!({
            "columns": {
                "done": [{"id": 7, "title": "first", "type": "task", "priority": "medium"}],
                "todo": [{"id": 7, "title": "second", "type": "task", "priority": "medium"}]
            }
        })))
        .unwrap();

        assert_eq!(board.task_count(), 1);
    }

    #[test]
    fn one_bad_record_does_not_sink_the_board() {
        let board = Board::load(&payload(json!({
            "columns": {
                "todo": [
                    {"id": 1, "title": "a", "type": "task", "priority": "high"},
                    {"id": 2, "title": null, "type": "bug", "priority": "low"},
                    {"title": "no id"}
                ],
                "done": [{"id": 3, "title": "c", "type": "story", "status": "completed"}]
            }
        })))
        .unwrap();

        let todo: Vec<&str> =
            board.column(Status::Todo).tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(todo, ["1", "2"]);
        assert_eq!(board.task("2").unwrap().title, "");
        assert_eq!(board.task("3").unwrap().status, Status::Done);
        assert_eq!(board.task_count(), 3);
    }

    #[test]
    fn load_fails_when_a_known_column_is_not_a_list() {
        let result = Board::load(&payload(json!({"columns": {"todo": {"id": 1}}})));
        assert!(result.is_err());
    }

    #[test]
    fn payload_round_trips_through_load() {
        let mut board = Board::default();
        board.append(Task::new("1", "one", Status::Blocked)).unwrap();
        board.append(Task::new("2", "two", Status::Done)).unwrap();

        let reloaded = Board::load(&board.to_payload()).unwrap();
        assert_eq!(reloaded, board);
    }

    #[test]
    fn append_goes_to_end_of_status_column() {
        let mut board = Board::default();
        board.append(Task::new("1", "one", Status::Review)).unwrap();
        board.append(Task::new("2", "two", Status::Review)).unwrap();

        let ids: Vec<&str> =
            board.column(Status::Review).tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
    }

    #[test]
    fn append_rejects_duplicate_id() {
        let mut board = Board::default();
        board.append(Task::new("1", "one", Status::Todo)).unwrap();
        let err = board.append(Task::new("1", "again", Status::Done)).unwrap_err();
        assert_eq!(err, BoardError::DuplicateTask("1".into()));
        assert_eq!(board.task_count(), 1);
    }
}
