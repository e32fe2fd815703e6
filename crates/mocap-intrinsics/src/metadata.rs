//! Session metadata descriptor written by the capture tooling.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use mocap_intrinsics_core::CheckerboardSpec;

#[derive(thiserror::Error, Debug)]
pub enum MetadataError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Checkerboard block of the session metadata descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CheckerboardDescriptor {
    #[serde(rename = "black2BlackCornersWidth_n")]
    pub corners_width_n: u32,
    #[serde(rename = "black2BlackCornersHeight_n")]
    pub corners_height_n: u32,
    #[serde(rename = "squareSideLength_mm")]
    pub square_side_length_mm: f64,
}

/// Session metadata, reduced to the fields calibration consumes.
///
/// The capture server writes many more keys into this descriptor; unknown
/// fields are ignored on load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionMetadata {
    #[serde(rename = "checkerBoard")]
    pub checker_board: CheckerboardDescriptor,
}

impl SessionMetadata {
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, MetadataError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Board geometry advertised by the descriptor, unvalidated.
    pub fn board(&self) -> CheckerboardSpec {
        CheckerboardSpec {
            corners_wide: self.checker_board.corners_width_n,
            corners_high: self.checker_board.corners_height_n,
            square_size_mm: self.checker_board.square_side_length_mm,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_capture_server_key_names() {
        let raw = r#"{
            "subjectID": "s042",
            "checkerBoard": {
                "black2BlackCornersWidth_n": 11,
                "black2BlackCornersHeight_n": 8,
                "squareSideLength_mm": 60.0,
                "placement": "backWall"
            }
        }"#;

        let meta: SessionMetadata = serde_json::from_str(raw).unwrap();
        let board = meta.board();
        assert_eq!(board.corners_wide, 11);
        assert_eq!(board.corners_high, 8);
        assert_eq!(board.square_size_mm, 60.0);
    }
}
