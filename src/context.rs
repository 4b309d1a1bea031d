//! Service context bundling all port trait objects.

use std::path::Path;
use std::sync::Arc;

use crate::adapters::live::{LiveBoardApi, LiveFileSystem};
use crate::adapters::recording::{RecordingBoardApi, RecordingFileSystem};
use crate::adapters::replaying::{ReplayingBoardApi, ReplayingFileSystem};
use crate::board::{BoardPayload, StatusUpdate};
use crate::cassette::config::CassetteConfig;
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::config::Config;
use crate::ports::board_api::{ApiError, ApiFuture, BoardApi, CreatedTask, NewTask};
use crate::ports::filesystem::{FileSystem, FsResult};

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, replaying, recording).
pub struct ServiceContext {
    /// Task backend.
    pub api: Box<dyn BoardApi>,
    /// Filesystem for the local board snapshot.
    pub fs: Box<dyn FileSystem>,
}

impl ServiceContext {
    /// Creates a live context talking to the backend in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn live(config: &Config) -> Result<Self, String> {
        let api = LiveBoardApi::new(config).map_err(|e| e.to_string())?;
        Ok(Self { api: Box::new(api), fs: Box::new(LiveFileSystem) })
    }

    /// Creates a live context whose interactions are recorded to per-port
    /// cassettes under a timestamped directory inside `root`.
    ///
    /// The returned session must be finished after the context is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette directory or HTTP client cannot be
    /// created.
    pub fn recording_at(root: &Path, config: &Config) -> Result<(Self, RecordingSession), String> {
        let session = RecordingSession::new(root, &config.api_url)?;
        let live = Self::live(config)?;
        let ctx = Self {
            api: Box::new(RecordingBoardApi::new(live.api, Arc::clone(&session.api))),
            fs: Box::new(RecordingFileSystem::new(live.fs, Arc::clone(&session.fs))),
        };
        Ok((ctx, session))
    }

    /// Creates a replaying context from a single cassette file.
    ///
    /// Both ports are served by the same cassette, each with its own cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let cassette = Cassette::load(path)?;
        Ok(Self {
            api: Box::new(ReplayingBoardApi::new(CassetteReplayer::new(&cassette))),
            fs: Box::new(ReplayingFileSystem::new(CassetteReplayer::new(&cassette))),
        })
    }

    /// Creates a replaying context from `path`: either a single cassette
    /// file or a directory written by a recording session.
    ///
    /// # Errors
    ///
    /// Returns an error if a cassette cannot be read or parsed.
    pub fn replaying_at(path: &Path) -> Result<Self, String> {
        if path.is_dir() {
            Self::replaying_from(&CassetteConfig::from_recording_dir(path))
        } else {
            Self::replaying(path)
        }
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// Ports without a configured cassette use an adapter that fails every
    /// call with a clear message.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, String> {
        let replayers = config.load_all()?;

        Ok(Self {
            api: match replayers.api {
                Some(r) => Box::new(ReplayingBoardApi::new(r)),
                None => Box::new(UnconfiguredBoardApi),
            },
            fs: match replayers.fs {
                Some(r) => Box::new(ReplayingFileSystem::new(r)),
                None => Box::new(UnconfiguredFileSystem),
            },
        })
    }
}

// --- Adapters for ports without a cassette ---

const NO_API_CASSETTE: &str = "BoardApi port not configured in CassetteConfig: no cassette loaded for api";
const NO_FS_CASSETTE: &str = "FileSystem port not configured in CassetteConfig: no cassette loaded for fs";

struct UnconfiguredBoardApi;
impl BoardApi for UnconfiguredBoardApi {
    fn fetch_board(&self) -> ApiFuture<'_, BoardPayload> {
        Box::pin(async { Err(ApiError::Replayed(NO_API_CASSETTE.into())) })
    }
    fn update_status(&self, _update: &StatusUpdate) -> ApiFuture<'_, ()> {
        Box::pin(async { Err(ApiError::Replayed(NO_API_CASSETTE.into())) })
    }
    fn create_task(&self, _task: &NewTask) -> ApiFuture<'_, CreatedTask> {
        Box::pin(async { Err(ApiError::Replayed(NO_API_CASSETTE.into())) })
    }
}

struct UnconfiguredFileSystem;
impl FileSystem for UnconfiguredFileSystem {
    fn read_to_string(&self, _path: &Path) -> FsResult<String> {
        Err(NO_FS_CASSETTE.into())
    }
    fn write(&self, _path: &Path, _contents: &str) -> FsResult<()> {
        Err(NO_FS_CASSETTE.into())
    }
    fn exists(&self, _path: &Path) -> bool {
        false
    }
}
