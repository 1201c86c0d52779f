use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{CueframeError, CueframeResult};
use crate::timeline::ease::Ease;

/// Seconds per narrative beat before pace scaling.
pub const BASE_BEAT_SECS: f64 = 0.6;

/// Fraction of the scene where every staggered element must have finished
/// building in, leaving the tail for the viewer to absorb the full frame.
pub const SETTLE_FRACTION: f64 = 0.85;

/// Build-in window length in seconds for callers that do not take one from
/// a template's beat plan.
pub const DEFAULT_BUILD_IN_SECS: f64 = 0.5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Timing multiplier resolved from `style_tokens.pace`.
pub enum Pace {
    /// Stretch beats for a deliberate delivery.
    Slow,
    /// Authored baseline.
    #[default]
    Normal,
    /// Compress beats for a brisk delivery.
    Fast,
}

impl Pace {
    /// Resolve an authored token; anything unknown falls back to `Normal`.
    pub fn from_token(token: Option<&str>) -> Self {
        match token {
            Some("slow") => Self::Slow,
            Some("fast") => Self::Fast,
            _ => Self::Normal,
        }
    }

    /// True when `token` is one of the authored pace words.
    pub fn is_known_token(token: &str) -> bool {
        matches!(token, "slow" | "normal" | "fast")
    }

    /// Beat-length multiplier; slow stretches, fast compresses.
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Slow => 1.35,
            Self::Normal => 1.0,
            Self::Fast => 0.75,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Frames per narrative beat at a given frame rate and pace.
pub struct BeatClock {
    frames_per_beat: f64,
}

impl BeatClock {
    /// Derive the clock for one scene.
    pub fn new(fps: Fps, pace: Pace) -> Self {
        Self {
            frames_per_beat: fps.as_f64() * BASE_BEAT_SECS * pace.multiplier(),
        }
    }

    /// Frames per beat as a fraction; schedules floor only at the end.
    pub fn frames_per_beat(self) -> f64 {
        self.frames_per_beat
    }

    /// Frames spanned by `beats` beats; negative inputs clamp to `0`.
    pub fn frames(self, beats: f64) -> f64 {
        self.frames_per_beat * beats.max(0.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
/// How staggered element start frames are spaced.
pub enum StaggerMode {
    /// `start = beat * (base + index * stride)`; total stretch grows with
    /// element count.
    FixedStride,
    /// Starts divide the span between entry and the settle point evenly, so
    /// the schedule rescales with element count and the last element is
    /// always fully built in by the settle point.
    DurationProportional,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Parameterized stagger scheduler for one scene.
pub struct BeatScheduler {
    clock: BeatClock,
    total_frames: u64,
    build_in_frames: u64,
}

impl BeatScheduler {
    /// Build a scheduler; the build-in window must be at least one frame.
    pub fn new(clock: BeatClock, total_frames: u64, build_in_frames: u64) -> CueframeResult<Self> {
        if build_in_frames == 0 {
            return Err(CueframeError::schedule(
                "build-in window must be at least one frame",
            ));
        }
        Ok(Self {
            clock,
            total_frames,
            build_in_frames,
        })
    }

    /// Build a scheduler with the engine's default build-in window.
    pub fn with_default_build_in(
        clock: BeatClock,
        total_frames: u64,
        fps: Fps,
    ) -> CueframeResult<Self> {
        let build_in = fps.secs_to_frames_floor(DEFAULT_BUILD_IN_SECS).max(1);
        Self::new(clock, total_frames, build_in)
    }

    /// Build-in window length in frames.
    pub fn build_in_frames(&self) -> u64 {
        self.build_in_frames
    }

    /// Latest frame by which every element must have settled.
    pub fn settle_frame(&self) -> u64 {
        (self.total_frames as f64 * SETTLE_FRACTION).floor() as u64
    }

    /// Start frame for element `index` of `count`.
    ///
    /// Monotonic in `index` for both modes; negative strides clamp to `0`
    /// (elements land together rather than out of order). Indexes at or
    /// past `count` clamp to the last slot.
    pub fn start_frame(
        &self,
        index: usize,
        count: usize,
        base_beats: f64,
        stride_beats: f64,
        mode: StaggerMode,
    ) -> FrameIndex {
        let count = count.max(1);
        let index = index.min(count - 1);
        let frames = match mode {
            StaggerMode::FixedStride => {
                self.clock.frames(base_beats) + self.clock.frames(stride_beats) * index as f64
            }
            StaggerMode::DurationProportional => {
                let entry = self.clock.frames(base_beats);
                let settle = self.settle_frame() as f64;
                let span = (settle - self.build_in_frames as f64 - entry).max(0.0);
                entry + span * index as f64 / count as f64
            }
        };
        FrameIndex(frames.floor().max(0.0) as u64)
    }

    /// Build-in progress of an element starting at `start`, eased by the
    /// default entrance curve.
    pub fn reveal_progress(&self, start: FrameIndex, frame: FrameIndex) -> f64 {
        self.reveal_progress_with(start, frame, Ease::OutCubic)
    }

    /// Build-in progress with an explicit entrance curve: exactly `0` at and
    /// before `start`, exactly `1` once the build-in window has elapsed, the
    /// eased fraction inside it.
    pub fn reveal_progress_with(&self, start: FrameIndex, frame: FrameIndex, ease: Ease) -> f64 {
        if frame.0 <= start.0 {
            return 0.0;
        }
        let elapsed = frame.0 - start.0;
        if elapsed >= self.build_in_frames {
            return 1.0;
        }
        ease.apply(elapsed as f64 / self.build_in_frames as f64)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/beat.rs"]
mod tests;
