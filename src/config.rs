//! Environment-driven configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Default backend base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";
/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;
/// Project new tasks are filed under unless configured otherwise.
pub const DEFAULT_PROJECT_ID: u64 = 10;

/// Runtime settings for the board client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backend base URL, without trailing slash.
    pub api_url: String,
    /// Bearer token for the `Authorization` header.
    pub token: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Project id sent when creating tasks.
    pub project_id: u64,
    /// Where to keep the local board snapshot.
    pub snapshot_path: Option<PathBuf>,
    /// Directory to record port cassettes into.
    pub record_dir: Option<PathBuf>,
    /// Cassette file, or recording directory, to replay instead of talking
    /// to the backend.
    pub replay_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            project_id: DEFAULT_PROJECT_ID,
            snapshot_path: None,
            record_dir: None,
            replay_path: None,
        }
    }
}

impl Config {
    /// Reads configuration from `TASKBOARD_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable does not parse.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value. Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable does not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let timeout = match get("TASKBOARD_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_number("TASKBOARD_TIMEOUT_SECS", &raw)?),
            None => defaults.timeout,
        };
        let project_id = match get("TASKBOARD_PROJECT_ID") {
            Some(raw) => parse_number("TASKBOARD_PROJECT_ID", &raw)?,
            None => defaults.project_id,
        };

        Ok(Self {
            api_url: get("TASKBOARD_API_URL")
                .map_or(defaults.api_url, |url| url.trim_end_matches('/').to_string()),
            token: get("TASKBOARD_TOKEN"),
            timeout,
            project_id,
            snapshot_path: get("TASKBOARD_SNAPSHOT").map(PathBuf::from),
            record_dir: get("TASKBOARD_RECORD").map(PathBuf::from),
            replay_path: get("TASKBOARD_REPLAY").map(PathBuf::from),
        })
    }
}

fn parse_number(key: &str, raw: &str) -> Result<u64, String> {
    raw.trim().parse().map_err(|e| format!("Invalid value for {key} ({raw:?}): {e}"))
}
