//! Workflow statuses and their backend status codes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::BoardError;

/// Column used when a column key has no backend code.
pub const FALLBACK_STATUS: Status = Status::Todo;

/// Workflow status, one per board column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    /// Pending work.
    #[default]
    Todo,
    /// Being worked on.
    InProgress,
    /// Awaiting review.
    Review,
    /// Cannot progress.
    Blocked,
    /// Finished.
    Done,
    /// Abandoned.
    Cancelled,
}

impl Status {
    /// Every status in board rendering order.
    pub const ALL: [Status; 6] = [
        Status::Todo,
        Status::InProgress,
        Status::Review,
        Status::Blocked,
        Status::Done,
        Status::Cancelled,
    ];

    /// Column key as used on the wire and in drag events.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "inProgress",
            Status::Review => "review",
            Status::Blocked => "blocked",
            Status::Done => "done",
            Status::Cancelled => "cancelled",
        }
    }

    /// Parses a column key. Matching is exact.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.key() == key)
    }

    /// Display title of the column.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Status::Todo => "Pendiente",
            Status::InProgress => "En Proceso",
            Status::Review => "En Revisión",
            Status::Blocked => "Bloqueado",
            Status::Done => "Completado",
            Status::Cancelled => "Cancelado",
        }
    }

    /// Backend status code (`estadoId`).
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Status::InProgress => 1,
            Status::Todo => 3,
            Status::Review => 4,
            Status::Blocked => 5,
            Status::Done => 6,
            Status::Cancelled => 7,
        }
    }

    /// Maps a backend status code back to its column.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.code() == code)
    }

    pub(super) fn index(self) -> usize {
        match self {
            Status::Todo => 0,
            Status::InProgress => 1,
            Status::Review => 2,
            Status::Blocked => 3,
            Status::Done => 4,
            Status::Cancelled => 5,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Status {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| BoardError::UnknownColumn(s.to_string()))
    }
}

/// Backend status code for a column key.
///
/// Total: a key with no column falls back to the code of
/// [`FALLBACK_STATUS`] and logs a warning.
#[must_use]
pub fn status_code_of(column_id: &str) -> u8 {
    if let Some(status) = Status::from_key(column_id) {
        status.code()
    } else {
        warn!(column = %column_id, fallback = %FALLBACK_STATUS, "no status code for column");
        FALLBACK_STATUS.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_backend_table() {
        assert_eq!(status_code_of("inProgress"), 1);
        assert_eq!(status_code_of("todo"), 3);
        assert_eq!(status_code_of("review"), 4);
        assert_eq!(status_code_of("blocked"), 5);
        assert_eq!(status_code_of("done"), 6);
        assert_eq!(status_code_of("cancelled"), 7);
    }

    #[test]
    fn unknown_column_falls_back_to_todo_code() {
        assert_eq!(status_code_of("unknownColumn"), 3);
        assert_eq!(status_code_of(""), 3);
        assert_eq!(status_code_of("Done"), 3);
    }

    #[test]
    fn status_code_of_is_repeatable() {
        let first = status_code_of("blocked");
        let second = status_code_of("blocked");
        assert_eq!(first, second);
    }

    #[test]
    fn codes_map_back_to_columns() {
        for status in Status::ALL {
            assert_eq!(Status::from_code(status.code()), Some(status));
        }
        assert_eq!(Status::from_code(2), None);
        assert_eq!(Status::from_code(0), None);
    }

    #[test]
    fn keys_parse_exactly() {
        assert_eq!("inProgress".parse::<Status>(), Ok(Status::InProgress));
        assert_eq!(
            "in_progress".parse::<Status>(),
            Err(BoardError::UnknownColumn("in_progress".into()))
        );
    }

    #[test]
    fn serde_uses_column_keys() {
        assert_eq!(serde_json::to_string(&Status::InProgress).unwrap(), "\"inProgress\"");
        let parsed: Status = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(parsed, Status::Cancelled);
    }
}
