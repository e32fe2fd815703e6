use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of one calibration video trial.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrialId(String);

impl TrialId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TrialId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// Lazy, finite, non-restartable stream of decoded video frames.
///
/// Implementations own the decoder state for one trial video. The stream is
/// consumed front to back exactly once; there is no seeking.
pub trait FrameSource {
    type Frame;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Total number of frames in the underlying video.
    fn frame_count(&self) -> usize;

    /// Decoded frame size in pixels as `(width, height)`.
    fn resolution(&self) -> (u32, u32);

    /// Camera model string recorded with the video.
    fn camera_model(&self) -> &str;

    /// Decode the next frame; `None` once the stream is exhausted.
    fn next_frame(&mut self) -> Result<Option<Self::Frame>, Self::Error>;
}

/// Opens the frame stream behind a trial identifier.
pub trait VideoProvider {
    type Source: FrameSource;

    fn open(&self, trial: &TrialId)
        -> Result<Self::Source, <Self::Source as FrameSource>::Error>;
}
