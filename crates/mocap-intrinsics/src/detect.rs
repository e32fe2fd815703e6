use mocap_intrinsics_core::CheckerboardSpec;
use nalgebra::Point2;

/// Locates checkerboard inner corners in a single frame.
///
/// Implementations return the complete corner grid in row-major board order
/// (matching [`CheckerboardSpec::object_points`]), or `None` when the board is
/// not visible or only partially detected. A miss on one frame is not an
/// error; the calibrator simply skips that frame.
pub trait CornerDetector {
    type Frame;

    fn detect(&self, frame: &Self::Frame, board: &CheckerboardSpec) -> Option<Vec<Point2<f64>>>;
}
