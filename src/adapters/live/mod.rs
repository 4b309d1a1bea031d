//! Live adapters for real external interactions.

pub mod board_api;
pub mod filesystem;

pub use board_api::LiveBoardApi;
pub use filesystem::LiveFileSystem;
