//! Board session: owns the board and keeps it in step with the backend.
//!
//! Moves are applied optimistically. The board is replaced with the moved
//! state before the status update is sent, and a failed update does not
//! roll it back; it raises a warning instead. Overlapping updates are not
//! ordered: whichever reaches the backend last wins, while the local board
//! always shows the latest local move.
//!
//! Failures never escape as errors from [`BoardSession::load`] or the move
//! path. They end up in [`BoardSession::error`] and
//! [`BoardSession::warning`].

use tracing::{debug, error, warn};

use crate::board::{Board, BoardError, DragEnd, Move, StatusUpdate, Task};
use crate::config::Config;
use crate::context::ServiceContext;
use crate::ports::{ApiError, ApiFuture, BoardApi, NewTask};
use crate::snapshot::SnapshotStore;

/// Shown when the board cannot be loaded.
pub const LOAD_FAILED_MESSAGE: &str =
    "Could not load the tasks. Please try again later.";
/// Shown when a status update could not be saved.
pub const PERSIST_FAILED_MESSAGE: &str =
    "Could not update the task status. Changes may not be saved.";

/// Where the session is in its load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// No load has completed yet.
    Loading,
    /// The board reflects the last successful load plus local changes.
    Ready,
    /// The last load failed; the board was reset to empty columns.
    Failed,
}

/// Stateful owner of a [`Board`] bound to a backend.
pub struct BoardSession<'a> {
    api: &'a dyn BoardApi,
    snapshot: Option<SnapshotStore<'a>>,
    board: Board,
    state: LoadState,
    error: Option<String>,
    warning: Option<String>,
}

impl<'a> BoardSession<'a> {
    /// Creates a session with empty columns that talks to `api`.
    #[must_use]
    pub fn new(api: &'a dyn BoardApi) -> Self {
        Self {
            api,
            snapshot: None,
            board: Board::default(),
            state: LoadState::Loading,
            error: None,
            warning: None,
        }
    }

    /// Creates a session over the context's ports, keeping a local
    /// snapshot when `config` names one.
    #[must_use]
    pub fn from_context(ctx: &'a ServiceContext, config: &Config) -> Self {
        let session = Self::new(ctx.api.as_ref());
        match &config.snapshot_path {
            Some(path) => session.with_snapshot(SnapshotStore::new(ctx.fs.as_ref(), path)),
            None => session,
        }
    }

    /// Writes the board to `store` after every committed change.
    #[must_use]
    pub fn with_snapshot(mut self, store: SnapshotStore<'a>) -> Self {
        self.snapshot = Some(store);
        self
    }

    /// The current board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Load cycle state.
    #[must_use]
    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Full-page error, set when the last load failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Non-blocking warning, set when a status update failed.
    #[must_use]
    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    /// Clears the warning banner.
    pub fn dismiss_warning(&mut self) {
        self.warning = None;
    }

    /// Replaces the whole board with the backend's.
    ///
    /// On failure the board is reset to empty columns and the error banner
    /// is set. Calling this again is the retry path.
    pub async fn load(&mut self) -> LoadState {
        self.state = LoadState::Loading;
        self.error = None;
        self.warning = None;

        let loaded = match self.api.fetch_board().await {
            Ok(payload) => Board::load(&payload).map_err(|e| ApiError::Decode(e.to_string())),
            Err(e) => Err(e),
        };

        match loaded {
            Ok(board) => {
                debug!(tasks = board.task_count(), "board loaded");
                self.commit(board);
                self.state = LoadState::Ready;
            }
            Err(e) => {
                error!(error = %e, "failed to load board");
                self.board = Board::default();
                self.error = Some(LOAD_FAILED_MESSAGE.to_string());
                self.state = LoadState::Failed;
            }
        }
        self.state
    }

    /// Applies a drag-end event to the board immediately.
    ///
    /// Returns the applied move, whose [`Move::status_update`] still has to
    /// be persisted, or `None` if the event changed nothing.
    pub fn apply_drag(&mut self, event: &DragEnd) -> Option<Move> {
        let (next, moved) = self.board.reconcile(event)?;
        debug!(
            task = %moved.task_id,
            from = %moved.from.column,
            to = %moved.to.column,
            index = moved.to.index,
            "task moved"
        );
        self.commit(next);
        Some(moved)
    }

    /// Starts sending `update` to the backend.
    ///
    /// The returned future does not borrow the session, so further moves can
    /// be applied while it is in flight. Hand its result to
    /// [`BoardSession::record_persist`].
    #[must_use]
    pub fn persist_request(&self, update: &StatusUpdate) -> ApiFuture<'a, ()> {
        let api = self.api;
        api.update_status(update)
    }

    /// Records the outcome of a status update. Returns whether it was saved.
    ///
    /// A failure leaves the board as it is and sets the warning banner.
    pub fn record_persist(&mut self, update: &StatusUpdate, result: Result<(), ApiError>) -> bool {
        match result {
            Ok(()) => {
                debug!(task = %update.task_id, estado_id = update.estado_id, "status saved");
                true
            }
            Err(e) => {
                error!(
                    task = %update.task_id,
                    estado_id = update.estado_id,
                    error = %e,
                    "failed to save task status"
                );
                self.warning = Some(PERSIST_FAILED_MESSAGE.to_string());
                false
            }
        }
    }

    /// Applies a drag-end event and persists the new status.
    ///
    /// Returns the applied move, if any. Whether it was saved shows up in
    /// [`BoardSession::warning`].
    pub async fn drag_end(&mut self, event: &DragEnd) -> Option<Move> {
        let moved = self.apply_drag(event)?;
        let update = moved.status_update();
        let result = self.persist_request(&update).await;
        self.record_persist(&update, result);
        Some(moved)
    }

    /// Appends an already created task to the column matching its status.
    ///
    /// # Errors
    ///
    /// Returns an error, after logging it, if the task id is already on the
    /// board.
    pub fn insert_created(&mut self, task: Task) -> Result<(), BoardError> {
        let mut next = self.board.clone();
        if let Err(e) = next.append(task) {
            error!(error = %e, "cannot add created task");
            return Err(e);
        }
        self.commit(next);
        Ok(())
    }

    /// Creates a task through the backend and appends it to the board.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend refuses the task, or if the stored
    /// record names an unknown column or duplicates a task on the board.
    pub async fn create(&mut self, new_task: &NewTask) -> Result<Task, String> {
        let created = self.api.create_task(new_task).await.map_err(|e| {
            error!(title = %new_task.title, error = %e, "failed to create task");
            format!("Error creating task: {e}")
        })?;

        let task = created.into_task(new_task).map_err(|e| {
            error!(error = %e, "created task has no column");
            format!("Error creating task: {e}")
        })?;

        self.insert_created(task.clone()).map_err(|e| format!("Error creating task: {e}"))?;
        Ok(task)
    }

    fn commit(&mut self, board: Board) {
        self.board = board;
        if let Some(store) = &self.snapshot {
            if let Err(e) = store.save(&self.board) {
                warn!(path = %store.path().display(), error = %e, "failed to write board snapshot");
            }
        }
    }
}
