use mocap_intrinsics_core::CheckerboardSpec;
use nalgebra::Point2;

/// One detected board view: corner pixels in row-major board order.
pub type CornerView = Vec<Point2<f64>>;

/// Intrinsics recovered by the solver, before camera identity is attached.
#[derive(Clone, Debug)]
pub struct SolvedIntrinsics {
    /// Focal length (fx, fy) in pixels.
    pub focal: [f64; 2],
    /// Principal point (cx, cy) in pixels.
    pub principal_point: [f64; 2],
    /// Distortion coefficients in the solver's native ordering.
    pub distortion: Vec<f64>,
    /// RMS reprojection error per accumulated view, in pixels.
    pub per_frame_reproj_error: Vec<f64>,
}

#[derive(thiserror::Error, Debug)]
pub enum SolveError {
    #[error("solver needs at least {needed} views (got {got})")]
    TooFewViews { needed: usize, got: usize },
    #[error("view {view} has {got} corners, expected {expected}")]
    CornerCountMismatch {
        view: usize,
        expected: usize,
        got: usize,
    },
    #[error("least-squares fit did not converge: {0}")]
    DidNotConverge(String),
}

/// Joint least-squares intrinsics fit over all accumulated board views.
///
/// The solve runs once over every view together, not per frame; the returned
/// per-view reprojection errors are diagnostics of that single joint fit.
pub trait IntrinsicsSolver {
    fn solve(
        &self,
        views: &[CornerView],
        board: &CheckerboardSpec,
        resolution: (u32, u32),
    ) -> Result<SolvedIntrinsics, SolveError>;
}
