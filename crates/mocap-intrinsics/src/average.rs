//! Multi-trial averaging and the per-trial comparison report.

use mocap_intrinsics_core::{
    Deviation, IntrinsicComparison, IntrinsicParameters, TrialDeviation, CURRENT_SCHEMA_VERSION,
};

use crate::calibrate::TrialCalibrationResult;
use crate::source::TrialId;

#[derive(thiserror::Error, Debug)]
pub enum AverageError {
    #[error("cannot average zero trial results")]
    Empty,
    #[error("trial {trial} does not match the first trial: {detail}")]
    InconsistentCamera { trial: TrialId, detail: String },
}

/// Mean with a fixed internal summation order.
///
/// Values are sorted by total order before summing, so the result is
/// bit-identical for any permutation of the same inputs.
fn stable_mean(mut values: Vec<f64>) -> f64 {
    let n = values.len() as f64;
    values.sort_by(f64::total_cmp);
    values.iter().sum::<f64>() / n
}

fn check_consistency(
    first: &IntrinsicParameters,
    result: &TrialCalibrationResult,
) -> Result<(), AverageError> {
    let params = &result.params;
    let mismatch = |detail: String| AverageError::InconsistentCamera {
        trial: result.trial.clone(),
        detail,
    };

    if params.resolution() != first.resolution() {
        return Err(mismatch(format!(
            "resolution {}x{} vs {}x{}",
            params.image_width, params.image_height, first.image_width, first.image_height
        )));
    }
    if params.camera_model != first.camera_model {
        return Err(mismatch(format!(
            "camera model {} vs {}",
            params.camera_model, first.camera_model
        )));
    }
    if params.distortion.len() != first.distortion.len() {
        return Err(mismatch(format!(
            "distortion model with {} coefficients vs {}",
            params.distortion.len(),
            first.distortion.len()
        )));
    }
    Ok(())
}

/// Average per-trial intrinsics into one representative profile.
///
/// All results must agree on resolution, camera model, and distortion model;
/// otherwise the trials were not recordings of the same physical camera setup
/// and averaging them would be meaningless. The comparison report carries each
/// trial's deviation from the mean for human review — outliers are surfaced,
/// never rejected automatically.
pub fn average_intrinsics(
    results: &[TrialCalibrationResult],
) -> Result<(IntrinsicParameters, IntrinsicComparison), AverageError> {
    let first = &results.first().ok_or(AverageError::Empty)?.params;
    for result in &results[1..] {
        check_consistency(first, result)?;
    }

    let column = |f: &dyn Fn(&IntrinsicParameters) -> f64| -> Vec<f64> {
        results.iter().map(|r| f(&r.params)).collect()
    };
    let mean_focal = [
        stable_mean(column(&|p| p.focal[0])),
        stable_mean(column(&|p| p.focal[1])),
    ];
    let mean_principal = [
        stable_mean(column(&|p| p.principal_point[0])),
        stable_mean(column(&|p| p.principal_point[1])),
    ];
    let mean_distortion: Vec<f64> = (0..first.distortion.len())
        .map(|i| stable_mean(column(&|p| p.distortion[i])))
        .collect();

    let average = IntrinsicParameters {
        schema_version: CURRENT_SCHEMA_VERSION,
        camera_model: first.camera_model.clone(),
        focal: mean_focal,
        principal_point: mean_principal,
        distortion: mean_distortion,
        image_width: first.image_width,
        image_height: first.image_height,
    };

    let trials = results
        .iter()
        .map(|result| {
            let p = &result.params;
            TrialDeviation {
                trial: result.trial.as_str().to_owned(),
                frames_used: result.frames_used,
                mean_reproj_error: result.mean_reproj_error(),
                fx: Deviation::between(p.focal[0], average.focal[0]),
                fy: Deviation::between(p.focal[1], average.focal[1]),
                cx: Deviation::between(p.principal_point[0], average.principal_point[0]),
                cy: Deviation::between(p.principal_point[1], average.principal_point[1]),
                distortion: p
                    .distortion
                    .iter()
                    .zip(&average.distortion)
                    .map(|(&value, &mean)| Deviation::between(value, mean))
                    .collect(),
            }
        })
        .collect();

    let comparison = IntrinsicComparison {
        schema_version: CURRENT_SCHEMA_VERSION,
        camera_model: average.camera_model.clone(),
        trials,
    };

    Ok((average, comparison))
}
