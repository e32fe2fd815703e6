//! Core types and persistence for camera-intrinsics calibration.
//!
//! This crate is intentionally small and purely data-oriented. It does *not*
//! depend on any video decoder, corner detector, or least-squares solver;
//! those live behind trait seams in the `mocap-intrinsics` pipeline crate.

mod board;
mod comparison;
mod intrinsics;
mod logger;
mod store;

pub use board::{BoardSpecError, CheckerboardSpec};
pub use comparison::{Deviation, IntrinsicComparison, TrialDeviation};
pub use intrinsics::{IntrinsicParameters, CURRENT_SCHEMA_VERSION};
pub use logger::init_with_level;
pub use store::{
    deploy_parameters, load_parameters, save_parameters, StoreError, PROFILE_FILE_NAME,
};
