use crate::descriptor::model::{Cue, SceneDescriptor};
use crate::descriptor::registry::{BeatPlan, TemplateFamily, TemplateRegistry};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{CueframeError, CueframeResult};
use crate::schedule::beat::{BeatClock, BeatScheduler, Pace};
use crate::timeline::ease::Ease;
use crate::timeline::frame::{ResolvedFrame, resolve_frame};
use crate::timeline::resolver::resolve_cue_progress;

/// Action tag carried by synthesized element cues.
pub const REVEAL_ACTION: &str = "reveal";

/// Synthesize one `"reveal"` cue per element from a template's beat plan.
///
/// Start frames follow the plan's stagger mode; every cue shares the plan's
/// build-in window as its reveal duration. Times are written back in seconds
/// so synthesized entries are interchangeable with authored ones.
pub fn synthesize_reveal_cues(
    elements: &[String],
    plan: BeatPlan,
    fps: Fps,
    pace: Pace,
    total_frames: u64,
) -> CueframeResult<Vec<Cue>> {
    let clock = BeatClock::new(fps, pace);
    let build_in_frames = clock.frames(plan.build_in_beats).round().max(1.0) as u64;
    let scheduler = BeatScheduler::new(clock, total_frames, build_in_frames)?;
    let duration_secs = fps.frames_to_secs(build_in_frames);

    let mut cues = Vec::with_capacity(elements.len());
    for (index, key) in elements.iter().enumerate() {
        let start = scheduler.start_frame(
            index,
            elements.len(),
            plan.base_beats,
            plan.stride_beats,
            plan.mode,
        );
        cues.push(
            Cue::new(fps.frames_to_secs(start.0), REVEAL_ACTION)
                .with_target(key.clone())
                .with_duration(duration_secs),
        );
    }
    Ok(cues)
}

#[derive(Clone, Debug)]
/// A descriptor bound to its effective timeline, ready for frame queries.
pub struct PreparedScene {
    descriptor: SceneDescriptor,
    cues: Vec<Cue>,
    fps: Fps,
    total_frames: u64,
    entrance: Ease,
}

impl PreparedScene {
    #[tracing::instrument(skip(descriptor, registry))]
    /// Bind `descriptor` to its effective timeline.
    ///
    /// Cue-driven templates keep their authored cue list as-is. Beat-driven
    /// templates get a synthesized reveal per fill element, with any authored
    /// cues appended after as accents. Fails on degenerate scalar fields or
    /// an unregistered template; content-level problems are left to
    /// [`crate::validate`].
    pub fn prepare(
        descriptor: SceneDescriptor,
        registry: &TemplateRegistry,
    ) -> CueframeResult<Self> {
        let fps = Fps::new(descriptor.fps)?;
        let total_frames = descriptor.duration_frames();
        if total_frames == 0 {
            return Err(CueframeError::validation(format!(
                "duration_s is {}; scene has no frames",
                descriptor.duration_s
            )));
        }
        let info = registry
            .get(&descriptor.template_id)
            .ok_or_else(|| {
                CueframeError::validation(format!(
                    "unknown template \"{}\"",
                    descriptor.template_id
                ))
            })?;

        let (cues, entrance) = match info.family {
            TemplateFamily::CueDriven => {
                (descriptor.timeline.clone().unwrap_or_default(), Ease::OutCubic)
            }
            TemplateFamily::BeatDriven => {
                let plan = info.beats.ok_or_else(|| {
                    CueframeError::schedule(format!(
                        "template \"{}\" is beat-driven but has no beat plan",
                        info.id
                    ))
                })?;
                let elements = descriptor
                    .fill
                    .as_ref()
                    .map(|f| f.sequence())
                    .unwrap_or_default();
                let mut cues = synthesize_reveal_cues(
                    &elements,
                    plan,
                    fps,
                    descriptor.pace(),
                    total_frames,
                )?;
                cues.extend(descriptor.timeline.iter().flatten().cloned());
                (cues, plan.entrance)
            }
        };

        tracing::debug!(
            template = %descriptor.template_id,
            cues = cues.len(),
            frames = total_frames,
            "prepared scene"
        );

        Ok(Self {
            descriptor,
            cues,
            fps,
            total_frames,
            entrance,
        })
    }

    /// The descriptor this scene was prepared from.
    pub fn descriptor(&self) -> &SceneDescriptor {
        &self.descriptor
    }

    /// The effective cue list driving this scene.
    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    /// Frame rate the scene resolves at.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Scene length in whole frames.
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Entrance curve element reveals ease over: the template's beat plan
    /// curve for beat-driven scenes, [`Ease::OutCubic`] for cue-driven ones.
    pub fn entrance(&self) -> Ease {
        self.entrance
    }

    /// Progress of `action` aimed at `target` at `frame`, with the overlap
    /// tie-break from [`resolve_cue_progress`].
    pub fn progress(&self, action: &str, target: Option<&str>, frame: FrameIndex) -> f64 {
        resolve_cue_progress(&self.cues, action, target, frame, self.fps)
    }

    /// Build-in progress of `target`'s reveal at `frame`, shaped by the
    /// scene's entrance curve. Linear progress comes from [`Self::progress`];
    /// renderers draw the eased value.
    pub fn reveal_progress(&self, target: &str, frame: FrameIndex) -> f64 {
        self.entrance
            .apply(self.progress(REVEAL_ACTION, Some(target), frame))
    }

    /// Full visual state snapshot at `frame`.
    pub fn frame_state(&self, frame: FrameIndex) -> ResolvedFrame {
        resolve_frame(&self.cues, frame, self.fps)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/synth.rs"]
mod tests;
