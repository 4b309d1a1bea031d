//! Port implementations.
//!
//! - `live`: real backend over HTTP and real disk I/O.
//! - `recording`: wraps another implementation and writes every call to a cassette.
//! - `replaying`: serves calls from a cassette without any I/O.

pub mod live;
pub mod recording;
pub mod replaying;
