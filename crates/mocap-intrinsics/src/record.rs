//! Cached trial record: the durable configuration of a successful run.
//!
//! The record lets a rerun skip re-entering trial identifiers and board
//! geometry. It does not cache calibration results; a rerun still calibrates
//! every trial from video.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use mocap_intrinsics_core::CheckerboardSpec;

use crate::resolver::ResolvedConfig;
use crate::source::TrialId;

#[derive(thiserror::Error, Debug)]
pub enum RecordError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// On-disk trial record. Field names predate this tool and are kept for
/// compatibility with existing session folders.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    pub trials: Vec<TrialId>,
    #[serde(rename = "nSquaresWidth")]
    pub n_squares_width: u32,
    #[serde(rename = "nSquaresHeight")]
    pub n_squares_height: u32,
    #[serde(rename = "squareSize")]
    pub square_size: f64,
    #[serde(rename = "cameraModel")]
    pub camera_model: String,
}

impl TrialRecord {
    /// Build the record to persist after a successful run.
    pub fn from_run(config: &ResolvedConfig, camera_model: &str) -> Self {
        Self {
            trials: config.trials.clone(),
            n_squares_width: config.board.corners_wide,
            n_squares_height: config.board.corners_high,
            square_size: config.board.square_size_mm,
            camera_model: camera_model.to_owned(),
        }
    }

    /// Board geometry stored in the record, unvalidated.
    pub fn board(&self) -> CheckerboardSpec {
        CheckerboardSpec {
            corners_wide: self.n_squares_width,
            corners_high: self.n_squares_height,
            square_size_mm: self.square_size,
        }
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, RecordError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write the record as pretty JSON, replacing any previous run's record.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), RecordError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
