//! Checkerboard camera-intrinsics calibration for motion-capture video
//! sessions.
//!
//! The crate orchestrates one calibration run end to end: resolve the board
//! geometry and trial list from an ordered set of config sources, calibrate
//! each trial video against the checkerboard, average the per-trial intrinsics
//! into a single camera profile, and persist the profile plus diagnostics.
//!
//! The heavy lifting — video decoding, corner detection, and the joint
//! least-squares fit — stays behind the [`FrameSource`], [`CornerDetector`]
//! and [`IntrinsicsSolver`] seams, so the pipeline itself carries no vision
//! dependencies.
//!
//! ## Quickstart
//!
//! ```ignore
//! use mocap_intrinsics::{run_calibration, CheckerboardSpec, RunConfig, TrialId};
//!
//! let board = CheckerboardSpec::new(11, 8, 60.0)?;
//! let trials = vec![TrialId::from("580e4c5a"), TrialId::from("ef42668e")];
//! let config = RunConfig::new("Data/IntrinsicCaptures/iPadMini6th_720_60FPS", board, trials);
//!
//! // `videos`, `detector` and `solver` implement the collaborator traits.
//! let summary = run_calibration(&config, &videos, &detector, &solver)?;
//! println!("averaged focal: {:?}", summary.average.focal);
//! ```

pub use mocap_intrinsics_core as core;

mod average;
mod calibrate;
mod detect;
mod error;
mod metadata;
mod pipeline;
mod record;
mod resolver;
mod solve;
mod source;

pub use average::{average_intrinsics, AverageError};
pub use calibrate::{calibrate_trial, CalibrateError, TrialCalibrationResult, MIN_DETECTIONS};
pub use detect::CornerDetector;
pub use error::PipelineError;
pub use metadata::{CheckerboardDescriptor, MetadataError, SessionMetadata};
pub use pipeline::{
    run_calibration, DeploymentConfig, RunConfig, RunSummary, DEFAULT_MAX_FRAMES,
};
pub use record::{RecordError, TrialRecord};
pub use resolver::{resolve_config, ConfigSource, ResolveError, ResolvedConfig, SessionPaths};
pub use solve::{CornerView, IntrinsicsSolver, SolveError, SolvedIntrinsics};
pub use source::{FrameSource, TrialId, VideoProvider};

pub use mocap_intrinsics_core::{
    CheckerboardSpec, IntrinsicComparison, IntrinsicParameters, TrialDeviation,
};
