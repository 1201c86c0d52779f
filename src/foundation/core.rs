use crate::foundation::error::{CueframeError, CueframeResult};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
/// Zero-based frame number within a scene or composition.
pub struct FrameIndex(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Half-open frame interval `[start, end)`.
pub struct FrameRange {
    /// First frame in the range.
    pub start: FrameIndex,
    /// One past the last frame.
    pub end: FrameIndex,
}

impl FrameRange {
    /// Build a range; `start` must not exceed `end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> CueframeResult<Self> {
        if start.0 > end.0 {
            return Err(CueframeError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Number of frames covered.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// True when the range covers no frames.
    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    /// True when `f` falls inside the half-open interval.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }

    /// Pin `f` to the nearest covered frame; empty ranges pin to `start`.
    pub fn clamp(self, f: FrameIndex) -> FrameIndex {
        if self.is_empty() {
            return self.start;
        }
        let max_inclusive = self.end.0.saturating_sub(1);
        FrameIndex(f.0.clamp(self.start.0, max_inclusive))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
/// Validated frame rate; always finite and `> 0`.
pub struct Fps(f64);

impl Fps {
    /// Validate and wrap a rate in hertz.
    pub fn new(hz: f64) -> CueframeResult<Self> {
        if !hz.is_finite() {
            return Err(CueframeError::validation("Fps must be finite"));
        }
        if hz <= 0.0 {
            return Err(CueframeError::validation("Fps must be > 0"));
        }
        Ok(Self(hz))
    }

    /// The raw rate.
    pub fn as_f64(self) -> f64 {
        self.0
    }

    /// Seconds covered by one frame.
    pub fn frame_duration_secs(self) -> f64 {
        1.0 / self.0
    }

    /// Seconds covered by `frames` whole frames.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }

    /// Whole frames fully elapsed after `secs`; negatives clamp to `0`.
    pub fn secs_to_frames_floor(self, secs: f64) -> u64 {
        (secs * self.0).floor().max(0.0) as u64
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Canvas dimensions in pixels.
pub struct CanvasSize {
    /// Width.
    pub w: f64,
    /// Height.
    pub h: f64,
}
