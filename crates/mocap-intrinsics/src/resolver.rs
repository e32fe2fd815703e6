//! Run-configuration resolution.
//!
//! Board geometry and trial list can come from three places. They are modeled
//! as an ordered list of named sources; the first source that yields a
//! configuration wins entirely, and sources never merge:
//!
//! 1. the cached trial record of a previous run (only when the caller opts
//!    in, and then exclusively — a missing record is an error, not a
//!    fall-through),
//! 2. the session metadata descriptor (board geometry only; the trial list
//!    stays the caller's),
//! 3. the caller's explicit configuration.

use std::path::{Path, PathBuf};

use log::info;

use mocap_intrinsics_core::{BoardSpecError, CheckerboardSpec};

use crate::metadata::{MetadataError, SessionMetadata};
use crate::record::{RecordError, TrialRecord};
use crate::source::TrialId;

const METADATA_FILE: &str = "sessionMetadata.json";
const TRIAL_RECORD_FILE: &str = "trialInfo.json";
const COMPARISON_FILE: &str = "intrinsicComparison.json";

/// Well-known file locations inside one capture session directory.
#[derive(Clone, Debug)]
pub struct SessionPaths {
    session_dir: PathBuf,
}

impl SessionPaths {
    pub fn new(session_dir: impl Into<PathBuf>) -> Self {
        Self {
            session_dir: session_dir.into(),
        }
    }

    #[inline]
    pub fn session_dir(&self) -> &Path {
        &self.session_dir
    }

    pub fn metadata(&self) -> PathBuf {
        self.session_dir.join(METADATA_FILE)
    }

    pub fn trial_record(&self) -> PathBuf {
        self.session_dir.join(TRIAL_RECORD_FILE)
    }

    pub fn comparison(&self) -> PathBuf {
        self.session_dir.join(COMPARISON_FILE)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ResolveError {
    #[error("no cached trial record at {path}; supply trials and board geometry explicitly")]
    MissingRecord { path: PathBuf },
    #[error("invalid board geometry from {source_name}: {source}")]
    InvalidBoard {
        source_name: &'static str,
        #[source]
        source: BoardSpecError,
    },
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error(transparent)]
    Metadata(#[from] MetadataError),
}

/// Configuration resolved for one calibration run.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedConfig {
    pub board: CheckerboardSpec,
    pub trials: Vec<TrialId>,
    /// Name of the config source that produced this configuration.
    pub source: &'static str,
}

/// One named place a run configuration can come from.
pub trait ConfigSource {
    fn name(&self) -> &'static str;

    /// `Ok(None)` means "not present here, try the next source".
    fn resolve(&self) -> Result<Option<ResolvedConfig>, ResolveError>;
}

struct CachedRecordSource {
    path: PathBuf,
}

impl ConfigSource for CachedRecordSource {
    fn name(&self) -> &'static str {
        "cached trial record"
    }

    fn resolve(&self) -> Result<Option<ResolvedConfig>, ResolveError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let record = TrialRecord::load_json(&self.path)?;
        let board = record.board();
        board.validate().map_err(|source| ResolveError::InvalidBoard {
            source_name: self.name(),
            source,
        })?;
        Ok(Some(ResolvedConfig {
            board,
            trials: record.trials,
            source: self.name(),
        }))
    }
}

struct MetadataSource {
    path: PathBuf,
    trials: Vec<TrialId>,
}

impl ConfigSource for MetadataSource {
    fn name(&self) -> &'static str {
        "session metadata"
    }

    fn resolve(&self) -> Result<Option<ResolvedConfig>, ResolveError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let metadata = SessionMetadata::load_json(&self.path)?;
        let board = metadata.board();
        board.validate().map_err(|source| ResolveError::InvalidBoard {
            source_name: self.name(),
            source,
        })?;
        Ok(Some(ResolvedConfig {
            board,
            trials: self.trials.clone(),
            source: self.name(),
        }))
    }
}

struct ExplicitSource {
    board: CheckerboardSpec,
    trials: Vec<TrialId>,
}

impl ConfigSource for ExplicitSource {
    fn name(&self) -> &'static str {
        "explicit configuration"
    }

    fn resolve(&self) -> Result<Option<ResolvedConfig>, ResolveError> {
        self.board
            .validate()
            .map_err(|source| ResolveError::InvalidBoard {
                source_name: self.name(),
                source,
            })?;
        Ok(Some(ResolvedConfig {
            board: self.board,
            trials: self.trials.clone(),
            source: self.name(),
        }))
    }
}

/// Resolve board geometry and trial list for a run.
///
/// With `use_cached_record` set, the cached record is the only source tried
/// and its absence is [`ResolveError::MissingRecord`].
pub fn resolve_config(
    paths: &SessionPaths,
    explicit_board: CheckerboardSpec,
    explicit_trials: &[TrialId],
    use_cached_record: bool,
) -> Result<ResolvedConfig, ResolveError> {
    let sources: Vec<Box<dyn ConfigSource>> = if use_cached_record {
        vec![Box::new(CachedRecordSource {
            path: paths.trial_record(),
        })]
    } else {
        vec![
            Box::new(MetadataSource {
                path: paths.metadata(),
                trials: explicit_trials.to_vec(),
            }),
            Box::new(ExplicitSource {
                board: explicit_board,
                trials: explicit_trials.to_vec(),
            }),
        ]
    };

    for source in &sources {
        if let Some(resolved) = source.resolve()? {
            info!("run configuration resolved from {}", source.name());
            return Ok(resolved);
        }
    }

    // Only reachable when the caller demanded the cached record.
    Err(ResolveError::MissingRecord {
        path: paths.trial_record(),
    })
}
