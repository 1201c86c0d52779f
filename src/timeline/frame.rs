use rayon::prelude::*;

use crate::descriptor::model::Cue;
use crate::foundation::core::{Fps, FrameIndex, FrameRange};
use crate::timeline::resolver::resolve_progress;

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// One cue's resolved progress inside a [`ResolvedFrame`].
pub struct ResolvedCue {
    /// Index of the cue in the unified timeline.
    pub index: usize,
    /// Action tag; `None` for draft cues that never got one.
    pub action: Option<String>,
    /// Target slot when the cue has one.
    pub target: Option<String>,
    /// Reveal progress in `[0, 1]`.
    pub progress: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Complete resolved state of one frame: every cue's progress, in timeline
/// order.
///
/// This is an ephemeral value handed to the renderer and dropped; the engine
/// keeps no state between frames, which is what makes out-of-order seeking
/// and parallel batch resolution safe.
pub struct ResolvedFrame {
    /// The frame this snapshot describes.
    pub frame: FrameIndex,
    /// Per-cue progress entries, index-aligned with the timeline.
    pub cues: Vec<ResolvedCue>,
}

#[tracing::instrument(skip(timeline))]
/// Resolve every cue's progress at one frame.
///
/// Pure: any frame may be resolved in any order, including far past the
/// scene end (every progress saturates at `1` there).
pub fn resolve_frame(timeline: &[Cue], frame: FrameIndex, fps: Fps) -> ResolvedFrame {
    let cues = timeline
        .iter()
        .enumerate()
        .map(|(index, cue)| ResolvedCue {
            index,
            action: cue.action.clone(),
            target: cue.target.clone(),
            progress: resolve_progress(cue, frame, fps),
        })
        .collect();
    ResolvedFrame { frame, cues }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Threading controls for [`resolve_frames_with`].
pub struct ResolveThreading {
    /// Fan frames out across the rayon pool.
    pub parallel: bool,
    /// Ranges shorter than this resolve sequentially even when `parallel`
    /// is set; spawning workers for a handful of frames costs more than it
    /// saves.
    pub min_parallel_frames: u64,
}

impl Default for ResolveThreading {
    fn default() -> Self {
        Self {
            parallel: true,
            min_parallel_frames: 64,
        }
    }
}

/// Resolve a frame range with default threading.
pub fn resolve_frames(timeline: &[Cue], range: FrameRange, fps: Fps) -> Vec<ResolvedFrame> {
    resolve_frames_with(timeline, range, fps, ResolveThreading::default())
}

#[tracing::instrument(skip(timeline))]
/// Resolve a frame range, optionally across the rayon pool.
///
/// Frame resolution shares no state, so the parallel and sequential paths
/// return identical snapshots in frame order.
pub fn resolve_frames_with(
    timeline: &[Cue],
    range: FrameRange,
    fps: Fps,
    threading: ResolveThreading,
) -> Vec<ResolvedFrame> {
    if threading.parallel && range.len_frames() >= threading.min_parallel_frames {
        (range.start.0..range.end.0)
            .into_par_iter()
            .map(|f| resolve_frame(timeline, FrameIndex(f), fps))
            .collect()
    } else {
        (range.start.0..range.end.0)
            .map(|f| resolve_frame(timeline, FrameIndex(f), fps))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/frame.rs"]
mod tests;
