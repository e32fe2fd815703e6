use serde::{Deserialize, Serialize};

/// Current on-disk schema version for persisted parameter records.
///
/// Bump this when the serialized field set changes; `load_parameters` refuses
/// records written by a newer library than the one reading them.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

pub(crate) fn default_schema_version() -> u32 {
    CURRENT_SCHEMA_VERSION
}

/// Intrinsic calibration of one physical camera model.
///
/// All pixel quantities refer to the resolution the calibration videos were
/// recorded at; a profile for `iPadMini` at 720p is a different record from
/// the same device at 1080p.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntrinsicParameters {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    /// Camera model identifier, e.g. `iPadMini6th_720_60FPS`.
    pub camera_model: String,
    /// Focal length (fx, fy) in pixels.
    pub focal: [f64; 2],
    /// Principal point (cx, cy) in pixels.
    pub principal_point: [f64; 2],
    /// Lens distortion coefficients in the solver's native ordering.
    pub distortion: Vec<f64>,
    pub image_width: u32,
    pub image_height: u32,
}

impl IntrinsicParameters {
    #[inline]
    pub fn resolution(&self) -> (u32, u32) {
        (self.image_width, self.image_height)
    }
}
