use crate::descriptor::model::Cue;
use crate::foundation::core::{Fps, FrameIndex};
use crate::timeline::ease::Ease;

/// Linear reveal progress of one cue at `frame`, in `[0, 1]`.
///
/// The reveal window opens at `t * fps` and spans `duration * fps` frames
/// (engine default when the cue omits `duration`). Before the window the
/// progress is exactly `0`, at or past its end exactly `1`, and inside it the
/// clamped linear fraction. Anomalous inputs (negative `t`, collapsed
/// windows) clamp instead of failing, so playback always has an answer.
///
/// Pure in all arguments: any frame may be resolved in any order.
pub fn resolve_progress(cue: &Cue, frame: FrameIndex, fps: Fps) -> f64 {
    let start = cue.start_secs() * fps.as_f64();
    let dur = cue.duration_secs() * fps.as_f64();
    let f = frame.0 as f64;
    if f < start {
        return 0.0;
    }
    if dur <= 0.0 || f >= start + dur {
        return 1.0;
    }
    ((f - start) / dur).clamp(0.0, 1.0)
}

/// [`resolve_progress`] shaped by `ease` for renderer-facing motion.
///
/// The temporal fraction stays linear; only the spatial fraction handed to
/// the renderer is curved.
pub fn resolve_progress_eased(cue: &Cue, frame: FrameIndex, fps: Fps, ease: Ease) -> f64 {
    ease.apply(resolve_progress(cue, frame, fps))
}

/// First cue in list order carrying `action` aimed at exactly `target`.
pub fn find_cue<'a>(timeline: &'a [Cue], action: &str, target: Option<&str>) -> Option<&'a Cue> {
    timeline.iter().find(|cue| cue.matches(action, target))
}

/// Every cue carrying `action`, in list order, regardless of target.
pub fn find_all_cues<'a>(timeline: &'a [Cue], action: &str) -> Vec<&'a Cue> {
    timeline
        .iter()
        .filter(|cue| cue.action.as_deref() == Some(action))
        .collect()
}

fn window_contains(cue: &Cue, frame: FrameIndex, fps: Fps) -> bool {
    let start = cue.start_secs() * fps.as_f64();
    let dur = cue.duration_secs() * fps.as_f64();
    let f = frame.0 as f64;
    f >= start && f < start + dur
}

/// Progress for `(action, target)` at `frame` with the overlap tie-break.
///
/// When several cues share an action and target, the first cue in list order
/// whose reveal window contains `frame` supplies the progress. When no window
/// contains it, the first matching cue supplies its clamped value (`0` before
/// its window, `1` after). No matching cue at all resolves to `0`: nothing
/// has revealed. Overlap is an authoring choice, not an error, and this rule
/// keeps it deterministic.
pub fn resolve_cue_progress(
    timeline: &[Cue],
    action: &str,
    target: Option<&str>,
    frame: FrameIndex,
    fps: Fps,
) -> f64 {
    let mut first_match: Option<&Cue> = None;
    for cue in timeline {
        if !cue.matches(action, target) {
            continue;
        }
        if window_contains(cue, frame, fps) {
            return resolve_progress(cue, frame, fps);
        }
        if first_match.is_none() {
            first_match = Some(cue);
        }
    }
    match first_match {
        Some(cue) => resolve_progress(cue, frame, fps),
        None => 0.0,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/resolver.rs"]
mod tests;
