//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the board engine and an external
//! system (the task backend, local files). Implementations live in
//! `src/adapters/`.

pub mod board_api;
pub mod filesystem;

pub use board_api::{ApiError, ApiFuture, BoardApi, CreatedTask, NewTask};
pub use filesystem::{FileSystem, FsResult};
