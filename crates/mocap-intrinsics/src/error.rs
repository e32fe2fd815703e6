use mocap_intrinsics_core::StoreError;

use crate::average::AverageError;
use crate::calibrate::CalibrateError;
use crate::record::RecordError;
use crate::resolver::ResolveError;
use crate::source::TrialId;

/// Any failure of a full calibration run.
///
/// Every variant is fatal: the run stops at the failing stage, nothing is
/// persisted, and the operator fixes the inputs and reruns.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("failed to open trial {trial}")]
    OpenTrial {
        trial: TrialId,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error(transparent)]
    Calibrate(#[from] CalibrateError),
    #[error(transparent)]
    Average(#[from] AverageError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Record(#[from] RecordError),
}
