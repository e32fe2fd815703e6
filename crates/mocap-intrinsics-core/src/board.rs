use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Checkerboard geometry used for calibration.
///
/// Dimensions count inner (black-to-black) corners, not squares. A board with
/// 12x9 squares therefore has `corners_wide = 11` and `corners_high = 8`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CheckerboardSpec {
    /// Inner corners along the board width.
    pub corners_wide: u32,
    /// Inner corners along the board height.
    pub corners_high: u32,
    /// Side length of one square in millimetres.
    pub square_size_mm: f64,
}

#[derive(thiserror::Error, Debug)]
pub enum BoardSpecError {
    #[error("corner grid must be at least 2x2 (got {wide}x{high})")]
    GridTooSmall { wide: u32, high: u32 },
    #[error("square size must be positive (got {0} mm)")]
    NonPositiveSquare(f64),
}

impl CheckerboardSpec {
    /// Build a validated board spec.
    pub fn new(
        corners_wide: u32,
        corners_high: u32,
        square_size_mm: f64,
    ) -> Result<Self, BoardSpecError> {
        let spec = Self {
            corners_wide,
            corners_high,
            square_size_mm,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Check the grid and square-size constraints.
    pub fn validate(&self) -> Result<(), BoardSpecError> {
        if self.corners_wide < 2 || self.corners_high < 2 {
            return Err(BoardSpecError::GridTooSmall {
                wide: self.corners_wide,
                high: self.corners_high,
            });
        }
        if !(self.square_size_mm > 0.0) {
            return Err(BoardSpecError::NonPositiveSquare(self.square_size_mm));
        }
        Ok(())
    }

    /// Number of inner corners on the board.
    #[inline]
    pub fn corner_count(&self) -> usize {
        self.corners_wide as usize * self.corners_high as usize
    }

    /// Planar board-frame corner positions in millimetres, row-major, Z = 0.
    ///
    /// The ordering matches the row-major pixel ordering a corner detector is
    /// expected to return, so view k of the detector pairs index-by-index with
    /// this grid.
    pub fn object_points(&self) -> Vec<Point3<f64>> {
        let mut points = Vec::with_capacity(self.corner_count());
        for row in 0..self.corners_high {
            for col in 0..self.corners_wide {
                points.push(Point3::new(
                    self.square_size_mm * col as f64,
                    self.square_size_mm * row as f64,
                    0.0,
                ));
            }
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rejects_degenerate_geometry() {
        assert!(matches!(
            CheckerboardSpec::new(1, 8, 60.0),
            Err(BoardSpecError::GridTooSmall { wide: 1, high: 8 })
        ));
        assert!(matches!(
            CheckerboardSpec::new(11, 8, 0.0),
            Err(BoardSpecError::NonPositiveSquare(_))
        ));
        assert!(matches!(
            CheckerboardSpec::new(11, 8, -60.0),
            Err(BoardSpecError::NonPositiveSquare(_))
        ));
    }

    #[test]
    fn object_points_cover_the_grid_row_major() {
        let spec = CheckerboardSpec::new(3, 2, 60.0).unwrap();
        let points = spec.object_points();
        assert_eq!(points.len(), 6);
        assert_relative_eq!(points[0].x, 0.0);
        assert_relative_eq!(points[2].x, 120.0);
        assert_relative_eq!(points[2].y, 0.0);
        assert_relative_eq!(points[3].y, 60.0);
        assert!(points.iter().all(|p| p.z == 0.0));
    }
}
