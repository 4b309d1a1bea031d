//! Task backend port: bulk board load, status persistence and task creation.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{BoardError, BoardPayload, Priority, Status, StatusUpdate, Task, TaskType};

/// Boxed future type alias used by [`BoardApi`] to keep the trait dyn-compatible.
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send + 'a>>;

/// Failures talking to the task backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connect, timeout, TLS...).
    #[error("request to {url} failed: {source}")]
    Transport {
        /// Target URL.
        url: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// The backend rejected the session token.
    #[error("unauthorized: the backend rejected the session token")]
    Unauthorized,

    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Backend `error` message, or the raw body.
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("failed to decode backend response: {0}")]
    Decode(String),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    /// A failure captured in a cassette and served during replay.
    #[error("{0}")]
    Replayed(String),
}

/// A task to create, as entered in the create dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    /// Title line.
    pub title: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Kind of work item.
    pub task_type: TaskType,
    /// Priority.
    pub priority: Priority,
}

impl NewTask {
    /// A task with the given title and default type and priority.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            task_type: TaskType::default(),
            priority: Priority::default(),
        }
    }
}

/// The backend's record of a freshly created task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedTask {
    /// Server-assigned id.
    #[serde(deserialize_with = "crate::board::task_id_from_string_or_number")]
    pub id: String,
    /// Stored title.
    pub titulo: String,
    /// Stored description.
    #[serde(default)]
    pub descripcion: Option<String>,
    /// Column key, when the backend reports one.
    #[serde(default)]
    pub status: Option<String>,
}

impl CreatedTask {
    /// Wraps the backend record into a board task.
    ///
    /// Type and priority come from `request`. A missing status
    /// means `todo`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownColumn`] if the reported status names no
    /// column.
    pub fn into_task(self, request: &NewTask) -> Result<Task, BoardError> {
        let status = match self.status.as_deref() {
            None => Status::Todo,
            Some(key) => key.parse()?,
        };
        Ok(Task {
            id: self.id,
            title: self.titulo,
            task_type: request.task_type,
            priority: request.priority,
            status,
            assignee: None,
        })
    }
}

/// Talks to the task backend.
pub trait BoardApi: Send + Sync {
    /// Fetches the whole board, grouped by column key.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is malformed.
    fn fetch_board(&self) -> ApiFuture<'_, BoardPayload>;

    /// Sets a task's backend status.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend refuses it.
    fn update_status(&self, update: &StatusUpdate) -> ApiFuture<'_, ()>;

    /// Creates a task and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend refuses it.
    fn create_task(&self, task: &NewTask) -> ApiFuture<'_, CreatedTask>;
}
