//! `taskboard code` command.

use crate::board::status_code_of;

/// Execute the `code` command.
///
/// Prints the backend status code for `column`. Unknown keys print the
/// fallback code and log a warning.
///
/// # Errors
///
/// Never fails; returns `Result` to match the other handlers.
pub fn run(column: &str) -> Result<(), String> {
    println!("{}", status_code_of(column));
    Ok(())
}
