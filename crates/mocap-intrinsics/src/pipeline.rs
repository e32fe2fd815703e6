//! The end-to-end calibration run.
//!
//! Stages: configuring, calibrating (sequential over trials), averaging,
//! persisting. Trials are independent of each other, but the reference flow
//! runs them one at a time; any stage failure aborts the whole run before
//! anything is written.

use std::path::PathBuf;

use log::info;

use mocap_intrinsics_core::{
    deploy_parameters, CheckerboardSpec, IntrinsicComparison, IntrinsicParameters,
};

use crate::average::average_intrinsics;
use crate::calibrate::{calibrate_trial, TrialCalibrationResult};
use crate::detect::CornerDetector;
use crate::error::PipelineError;
use crate::record::TrialRecord;
use crate::resolver::{resolve_config, SessionPaths};
use crate::solve::IntrinsicsSolver;
use crate::source::{FrameSource, TrialId, VideoProvider};

/// Upper bound on frames sampled per trial video when the caller does not
/// override it.
pub const DEFAULT_MAX_FRAMES: usize = 50;

/// Where to publish the averaged profile.
#[derive(Clone, Debug)]
pub struct DeploymentConfig {
    /// Root directory of the per-model profile tree.
    pub root: PathBuf,
    /// Deployment slot names; each receives an identical copy of the profile.
    pub variants: Vec<String>,
}

/// Explicit configuration for one calibration run.
///
/// Everything the run needs arrives through this struct; there is no ambient
/// or global state.
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// Capture session directory holding metadata, the trial record, and the
    /// comparison report.
    pub session_dir: PathBuf,
    /// Fallback board geometry, used when neither the cached record nor the
    /// session metadata provide one.
    pub board: CheckerboardSpec,
    /// Fallback trial list; the cached record overrides it when opted in.
    pub trials: Vec<TrialId>,
    /// Reuse board geometry and trial list from the previous successful run.
    pub use_cached_record: bool,
    pub max_frames_per_trial: usize,
    /// When set, the averaged profile is published after a successful run.
    pub deployment: Option<DeploymentConfig>,
}

impl RunConfig {
    pub fn new(
        session_dir: impl Into<PathBuf>,
        board: CheckerboardSpec,
        trials: Vec<TrialId>,
    ) -> Self {
        Self {
            session_dir: session_dir.into(),
            board,
            trials,
            use_cached_record: false,
            max_frames_per_trial: DEFAULT_MAX_FRAMES,
            deployment: None,
        }
    }
}

/// Outcome of a completed calibration run.
#[derive(Clone, Debug)]
pub struct RunSummary {
    pub average: IntrinsicParameters,
    pub per_trial: Vec<TrialCalibrationResult>,
    pub comparison: IntrinsicComparison,
    /// Config source that supplied board geometry and trial list.
    pub config_source: &'static str,
    /// Profile paths written by the deployment fan-out, in variant order.
    pub deployed_to: Vec<PathBuf>,
}

/// Run one calibration session end to end.
///
/// On success the trial record and comparison report under the session
/// directory are rewritten unconditionally, and the averaged profile is
/// deployed when the config asks for it.
pub fn run_calibration<P, D, V>(
    config: &RunConfig,
    videos: &P,
    detector: &D,
    solver: &V,
) -> Result<RunSummary, PipelineError>
where
    P: VideoProvider,
    D: CornerDetector<Frame = <P::Source as FrameSource>::Frame>,
    V: IntrinsicsSolver,
{
    let paths = SessionPaths::new(&config.session_dir);

    info!(
        "configuring calibration run for {}",
        config.session_dir.display()
    );
    let resolved = resolve_config(
        &paths,
        config.board,
        &config.trials,
        config.use_cached_record,
    )?;

    info!("calibrating {} trial(s)", resolved.trials.len());
    let mut per_trial = Vec::with_capacity(resolved.trials.len());
    for trial in &resolved.trials {
        let mut source = videos.open(trial).map_err(|source| PipelineError::OpenTrial {
            trial: trial.clone(),
            source: Box::new(source),
        })?;
        per_trial.push(calibrate_trial(
            &mut source,
            detector,
            solver,
            &resolved.board,
            trial,
            config.max_frames_per_trial,
        )?);
    }

    info!("averaging intrinsics across {} result(s)", per_trial.len());
    let (average, comparison) = average_intrinsics(&per_trial)?;

    info!("persisting results");
    let mut deployed_to = Vec::new();
    if let Some(deployment) = &config.deployment {
        deployed_to = deploy_parameters(&deployment.root, &deployment.variants, &average)?;
        for path in &deployed_to {
            info!("deployed profile to {}", path.display());
        }
    }
    TrialRecord::from_run(&resolved, &average.camera_model).write_json(paths.trial_record())?;
    comparison.write_json(paths.comparison())?;

    info!(
        "calibration run complete for camera model {}",
        average.camera_model
    );
    Ok(RunSummary {
        average,
        per_trial,
        comparison,
        config_source: resolved.source,
        deployed_to,
    })
}
