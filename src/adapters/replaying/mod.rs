//! Replaying adapters that serve recorded interactions.

pub mod board_api;
pub mod filesystem;

use std::sync::Mutex;

use serde::de::DeserializeOwned;

use crate::cassette::replayer::CassetteReplayer;

pub use board_api::ReplayingBoardApi;
pub use filesystem::ReplayingFileSystem;

/// Take the output of the next recorded `port::method` interaction.
pub(crate) fn next_output(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> Result<serde_json::Value, String> {
    let mut guard = replayer.lock().map_err(|_| format!("{port} replayer lock poisoned"))?;
    guard.next_interaction(port, method).map(|interaction| interaction.output.clone())
}

/// Decode a recorded `Result` using the Ok/Err JSON convention.
///
/// Mirror of `recording::record_result`:
/// - `{"Ok": v}` yields `Ok(v)`
/// - `{"Err": "message"}` yields `Err("message")`
pub(crate) fn replay_result<T: DeserializeOwned>(output: serde_json::Value) -> Result<T, String> {
    if let Some(err) = output.get("Err") {
        return Err(err.as_str().unwrap_or("unknown error").to_string());
    }
    let Some(value) = output.get("Ok") else {
        return Err(format!("malformed cassette output, expected Ok or Err: {output}"));
    };
    serde_json::from_value(value.clone()).map_err(|e| format!("failed to decode recorded value: {e}"))
}
