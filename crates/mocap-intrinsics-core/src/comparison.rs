//! Per-trial deviation report against the averaged intrinsics.
//!
//! The report is diagnostic only: it is written for human review after every
//! run and is never used to reject outlier trials automatically.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::intrinsics::default_schema_version;
use crate::store::StoreError;

/// Signed deviation of one scalar parameter from the multi-trial mean.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Deviation {
    /// `value - mean`.
    pub absolute: f64,
    /// `(value - mean) / mean`; 0 when the mean is 0.
    pub relative: f64,
}

impl Deviation {
    pub fn between(value: f64, mean: f64) -> Self {
        let absolute = value - mean;
        let relative = if mean == 0.0 { 0.0 } else { absolute / mean };
        Self { absolute, relative }
    }
}

/// How far one trial's solved intrinsics sit from the averaged profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrialDeviation {
    pub trial: String,
    /// Frames that entered this trial's solve.
    pub frames_used: usize,
    /// Mean RMS reprojection error over those frames, in pixels.
    pub mean_reproj_error: f64,
    pub fx: Deviation,
    pub fy: Deviation,
    pub cx: Deviation,
    pub cy: Deviation,
    /// One entry per distortion coefficient position.
    pub distortion: Vec<Deviation>,
}

/// Full comparison report for one calibration session run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntrinsicComparison {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub camera_model: String,
    pub trials: Vec<TrialDeviation>,
}

impl IntrinsicComparison {
    /// Write the report as pretty JSON, overwriting any previous run's file.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
