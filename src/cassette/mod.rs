//! Cassettes: recorded port interactions used for deterministic replay.

pub mod config;
pub mod format;
pub mod recorder;
pub mod replayer;
pub mod session;
