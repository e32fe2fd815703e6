//! Single-trial calibration: sample frames, detect the board, solve jointly.

use log::{debug, info};

use mocap_intrinsics_core::{CheckerboardSpec, IntrinsicParameters, CURRENT_SCHEMA_VERSION};

use crate::detect::CornerDetector;
use crate::solve::{CornerView, IntrinsicsSolver, SolveError};
use crate::source::{FrameSource, TrialId};

/// Minimum successful detections needed before the solve is attempted.
pub const MIN_DETECTIONS: usize = 10;

#[derive(thiserror::Error, Debug)]
pub enum CalibrateError {
    #[error(
        "trial {trial}: only {detected} of {sampled} sampled frames had a \
         detectable board (need {required})"
    )]
    InsufficientDetections {
        trial: TrialId,
        detected: usize,
        sampled: usize,
        required: usize,
    },
    #[error("trial {trial}: video decode failed")]
    Source {
        trial: TrialId,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("trial {trial}: {source}")]
    Solve {
        trial: TrialId,
        #[source]
        source: SolveError,
    },
}

/// Output of one trial's calibration. Write-once; the averager only reads it.
#[derive(Clone, Debug)]
pub struct TrialCalibrationResult {
    pub trial: TrialId,
    pub params: IntrinsicParameters,
    /// RMS reprojection error for each frame that entered the solve.
    pub per_frame_reproj_error: Vec<f64>,
    pub frames_used: usize,
}

impl TrialCalibrationResult {
    /// Mean of the per-frame reprojection errors; 0 when none were reported.
    pub fn mean_reproj_error(&self) -> f64 {
        if self.per_frame_reproj_error.is_empty() {
            return 0.0;
        }
        self.per_frame_reproj_error.iter().sum::<f64>()
            / self.per_frame_reproj_error.len() as f64
    }
}

/// Evenly spaced frame indices covering the whole stream.
///
/// Spreading samples across the trial duration avoids correlated blur and
/// lighting bias from any one section of the video.
fn sample_indices(frame_count: usize, max_frames: usize) -> Vec<usize> {
    if frame_count == 0 || max_frames == 0 {
        return Vec::new();
    }
    if frame_count <= max_frames {
        return (0..frame_count).collect();
    }
    // Strictly increasing because frame_count > max_frames.
    (0..max_frames).map(|k| k * frame_count / max_frames).collect()
}

/// Calibrate one trial video against the checkerboard.
///
/// Samples up to `max_frames` frames evenly across the stream, skips frames
/// where detection fails, and runs the solver once over all surviving views
/// jointly. Fails when fewer than [`MIN_DETECTIONS`] frames are usable.
pub fn calibrate_trial<S, D, V>(
    source: &mut S,
    detector: &D,
    solver: &V,
    board: &CheckerboardSpec,
    trial: &TrialId,
    max_frames: usize,
) -> Result<TrialCalibrationResult, CalibrateError>
where
    S: FrameSource,
    D: CornerDetector<Frame = S::Frame>,
    V: IntrinsicsSolver,
{
    let resolution = source.resolution();
    let camera_model = source.camera_model().to_owned();
    let wanted = sample_indices(source.frame_count(), max_frames);
    let sampled = wanted.len();

    let mut views: Vec<CornerView> = Vec::with_capacity(sampled);
    let mut wanted = wanted.into_iter().peekable();
    let mut index = 0usize;
    while let Some(&target) = wanted.peek() {
        let frame = match source.next_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => break,
            Err(source) => {
                return Err(CalibrateError::Source {
                    trial: trial.clone(),
                    source: Box::new(source),
                })
            }
        };
        if index == target {
            wanted.next();
            match detector.detect(&frame, board) {
                Some(corners) => views.push(corners),
                None => debug!("trial {trial}: no board in frame {index}"),
            }
        }
        index += 1;
    }

    if views.len() < MIN_DETECTIONS {
        return Err(CalibrateError::InsufficientDetections {
            trial: trial.clone(),
            detected: views.len(),
            sampled,
            required: MIN_DETECTIONS,
        });
    }
    info!(
        "trial {trial}: {}/{} sampled frames usable",
        views.len(),
        sampled
    );

    let frames_used = views.len();
    let solved = solver
        .solve(&views, board, resolution)
        .map_err(|source| CalibrateError::Solve {
            trial: trial.clone(),
            source,
        })?;

    Ok(TrialCalibrationResult {
        trial: trial.clone(),
        params: IntrinsicParameters {
            schema_version: CURRENT_SCHEMA_VERSION,
            camera_model,
            focal: solved.focal,
            principal_point: solved.principal_point,
            distortion: solved.distortion,
            image_width: resolution.0,
            image_height: resolution.1,
        },
        per_frame_reproj_error: solved.per_frame_reproj_error,
        frames_used,
    })
}
