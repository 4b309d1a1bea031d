//! Drag-and-drop reconciliation: relocating a task and re-deriving its status.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Board, Status};

/// A drag gesture that ended, as reported by the board UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragEnd {
    /// Id of the task being dragged.
    pub active_id: String,
    /// Drop target: a task id or a column key. `None` when dropped outside
    /// any target.
    pub over_id: Option<String>,
}

impl DragEnd {
    /// A drop of `active_id` onto `over_id`.
    pub fn new(active_id: impl Into<String>, over_id: impl Into<String>) -> Self {
        Self { active_id: active_id.into(), over_id: Some(over_id.into()) }
    }

    /// A drop outside any target.
    pub fn outside(active_id: impl Into<String>) -> Self {
        Self { active_id: active_id.into(), over_id: None }
    }
}

/// A slot on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Column holding the slot.
    pub column: Status,
    /// Zero-based index within the column.
    pub index: usize,
}

/// A task relocation that was applied to a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    /// The relocated task.
    pub task_id: String,
    /// Where the task was before the move.
    pub from: Position,
    /// Where the task ended up.
    pub to: Position,
}

impl Move {
    /// Whether the task changed column, not only position.
    #[must_use]
    pub fn changes_status(&self) -> bool {
        self.from.column != self.to.column
    }

    /// The persistence request for this move.
    #[must_use]
    pub fn status_update(&self) -> StatusUpdate {
        StatusUpdate { task_id: self.task_id.clone(), estado_id: self.to.column.code() }
    }
}

/// Request to set a task's backend status.
///
/// Serializes as the request body, `{"estadoId": <code>}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    /// Task to update; part of the URL, not the body.
    #[serde(skip)]
    pub task_id: String,
    /// Backend status code.
    #[serde(rename = "estadoId")]
    pub estado_id: u8,
}

impl Board {
    /// Applies a drag-end event and returns the next board with the move.
    ///
    /// Returns `None`, leaving nothing to persist, when the dragged task or
    /// the drop target cannot be found, when there is no drop target, or
    /// when the task is dropped onto its own slot.
    ///
    /// Dropping onto a column key appends to that column; dropping onto a
    /// task inserts at that task's index. The index is taken before the
    /// dragged task is removed and clamped to the column length afterwards.
    #[must_use]
    pub fn reconcile(&self, event: &DragEnd) -> Option<(Board, Move)> {
        let Some(from) = self.locate(&event.active_id) else {
            debug!(task = %event.active_id, "dragged task not on board");
            return None;
        };
        let over_id = event.over_id.as_deref()?;
        let Some(target) = self.resolve_target(over_id) else {
            debug!(task = %event.active_id, over = %over_id, "drag ended over invalid target");
            return None;
        };
        if from == target {
            return None;
        }

        let mut next = self.clone();
        let mut task = next.column_mut(from.column).tasks.remove(from.index);
        task.status = target.column;

        let destination = next.column_mut(target.column);
        let index = target.index.min(destination.tasks.len());
        destination.tasks.insert(index, task);

        let moved = Move {
            task_id: event.active_id.clone(),
            from,
            to: Position { column: target.column, index },
        };
        Some((next, moved))
    }

    fn resolve_target(&self, over_id: &str) -> Option<Position> {
        if let Some(status) = Status::from_key(over_id) {
            return Some(Position { column: status, index: self.column(status).tasks.len() });
        }
        self.locate(over_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Task;

    fn board_with(columns: &[(Status, &[&str])]) -> Board {
        let mut board = Board::default();
        for (status, ids) in columns {
            for id in *ids {
                board.append(Task::new(*id, format!("task {id}"), *status)).unwrap();
            }
        }
        board
    }

    fn ids(board: &Board, status: Status) -> Vec<&str> {
        board.column(status).tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn move_onto_column_id_appends_and_sets_status() {
        let board = board_with(&[(Status::Todo, &["A", "B"])]);

        let (next, moved) = board.reconcile(&DragEnd::new("A", "done")).unwrap();

        assert_eq!(ids(&next, Status::Todo), ["B"]);
        assert_eq!(ids(&next, Status::Done), ["A"]);
        assert_eq!(next.task("A").unwrap().status, Status::Done);
        assert_eq!(moved.to, Position { column: Status::Done, index: 0 });
        assert_eq!(moved.status_update(), StatusUpdate { task_id: "A".into(), estado_id: 6 });
        assert!(moved.changes_status());
    }

    #[test]
    fn reorder_within_column_keeps_status() {
        let board = board_with(&[(Status::InProgress, &["X", "Y"])]);

        let (next, moved) = board.reconcile(&DragEnd::new("Y", "X")).unwrap();

        assert_eq!(ids(&next, Status::InProgress), ["Y", "X"]);
        assert!(next.tasks().all(|t| t.status == Status::InProgress));
        assert!(!moved.changes_status());
        assert_eq!(moved.status_update().estado_id, 1);
    }

    #[test]
    fn reorder_downwards_uses_pre_removal_index() {
        let board = board_with(&[(Status::Todo, &["A", "B", "C"])]);

        let (next, _) = board.reconcile(&DragEnd::new("A", "C")).unwrap();

        assert_eq!(ids(&next, Status::Todo), ["B", "C", "A"]);
    }

    #[test]
    fn drop_onto_task_in_other_column_inserts_before_it() {
        let board = board_with(&[(Status::Todo, &["A"]), (Status::Review, &["R1", "R2"])]);

        let (next, moved) = board.reconcile(&DragEnd::new("A", "R2")).unwrap();

        assert_eq!(ids(&next, Status::Review), ["R1", "A", "R2"]);
        assert_eq!(next.task("A").unwrap().status, Status::Review);
        assert_eq!(moved.from, Position { column: Status::Todo, index: 0 });
        assert_eq!(moved.to, Position { column: Status::Review, index: 1 });
    }

    #[test]
    fn self_drop_is_a_no_op() {
        let board = board_with(&[(Status::Todo, &["A", "B"])]);
        assert!(board.reconcile(&DragEnd::new("B", "B")).is_none());
    }

    #[test]
    fn drop_into_empty_column_lands_at_index_zero() {
        let board = board_with(&[(Status::Blocked, &["A"])]);

        let (next, moved) = board.reconcile(&DragEnd::new("A", "cancelled")).unwrap();

        assert_eq!(ids(&next, Status::Cancelled), ["A"]);
        assert!(next.column(Status::Blocked).tasks.is_empty());
        assert_eq!(moved.to.index, 0);
    }

    #[test]
    fn drop_onto_own_column_moves_to_end() {
        let board = board_with(&[(Status::Todo, &["A", "B"])]);

        let (next, moved) = board.reconcile(&DragEnd::new("A", "todo")).unwrap();

        assert_eq!(ids(&next, Status::Todo), ["B", "A"]);
        assert_eq!(moved.to.index, 1);
    }

    #[test]
    fn unknown_task_or_target_is_a_no_op() {
        let board = board_with(&[(Status::Todo, &["A"])]);
        assert!(board.reconcile(&DragEnd::new("missing", "done")).is_none());
        assert!(board.reconcile(&DragEnd::new("A", "nowhere")).is_none());
        assert!(board.reconcile(&DragEnd::outside("A")).is_none());
    }

    #[test]
    fn input_board_is_untouched() {
        let board = board_with(&[(Status::Todo, &["A", "B"])]);
        let before = board.clone();

        let _ = board.reconcile(&DragEnd::new("A", "done"));

        assert_eq!(board, before);
    }

    #[test]
    fn status_update_body_is_estado_id_only() {
        let update = StatusUpdate { task_id: "12".into(), estado_id: 5 };
        assert_eq!(serde_json::to_value(&update).unwrap(), serde_json::json!({"estadoId": 5}));
    }
}
