use std::collections::BTreeMap;
use std::fmt;

use crate::descriptor::model::SceneDescriptor;
use crate::descriptor::validate::{Issue, IssueKind};
use crate::foundation::core::FrameIndex;

/// Frames reserved at the head of every composition for the opening fade,
/// on top of the scenes' combined spans.
pub const OPENING_OVERLAP_FRAMES: u64 = 10;

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
/// Narrative pillar a scene fills within a composition.
///
/// Derived ordering follows the narrative, so sorted collections keyed by
/// pillar play back in story order.
pub enum PillarKind {
    /// Opening attention grab.
    Hook,
    /// Core explanation.
    Explain,
    /// Worked application of the idea.
    Apply,
    /// Closing takeaway.
    Reflect,
}

impl PillarKind {
    /// All pillars in narrative order.
    pub const ORDER: [Self; 4] = [Self::Hook, Self::Explain, Self::Apply, Self::Reflect];

    /// Stable lowercase name, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hook => "hook",
            Self::Explain => "explain",
            Self::Apply => "apply",
            Self::Reflect => "reflect",
        }
    }
}

impl fmt::Display for PillarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug)]
/// One scene slotted into a pillar, with its exit transition length.
pub struct PillarScene {
    /// The scene filling the slot.
    pub descriptor: SceneDescriptor,
    /// Frames at this scene's tail shared with the next scene's entrance.
    pub exit_transition_frames: u64,
}

impl PillarScene {
    /// Slot a scene with its exit transition length.
    pub fn new(descriptor: SceneDescriptor, exit_transition_frames: u64) -> Self {
        Self {
            descriptor,
            exit_transition_frames,
        }
    }

    /// Declared scene length in frames.
    pub fn duration_frames(&self) -> u64 {
        self.descriptor.duration_frames()
    }

    /// Frames this scene occupies exclusively: its duration minus the tail
    /// it shares with the next scene. Clamps to `0` when the transition is
    /// longer than the scene.
    pub fn effective_span(&self) -> u64 {
        self.duration_frames()
            .saturating_sub(self.exit_transition_frames)
    }
}

#[derive(Clone, Debug, Default)]
/// The four pillar slots of one composition. Any subset may be filled;
/// absent pillars are skipped without leaving gaps.
pub struct PillarSlots {
    /// Hook slot.
    pub hook: Option<PillarScene>,
    /// Explain slot.
    pub explain: Option<PillarScene>,
    /// Apply slot.
    pub apply: Option<PillarScene>,
    /// Reflect slot.
    pub reflect: Option<PillarScene>,
}

impl PillarSlots {
    /// Empty composition.
    pub fn new() -> Self {
        Self::default()
    }

    /// The scene in `kind`'s slot, if any.
    pub fn get(&self, kind: PillarKind) -> Option<&PillarScene> {
        match kind {
            PillarKind::Hook => self.hook.as_ref(),
            PillarKind::Explain => self.explain.as_ref(),
            PillarKind::Apply => self.apply.as_ref(),
            PillarKind::Reflect => self.reflect.as_ref(),
        }
    }

    /// Fill `kind`'s slot, replacing any previous scene.
    pub fn set(&mut self, kind: PillarKind, scene: PillarScene) {
        let slot = match kind {
            PillarKind::Hook => &mut self.hook,
            PillarKind::Explain => &mut self.explain,
            PillarKind::Apply => &mut self.apply,
            PillarKind::Reflect => &mut self.reflect,
        };
        *slot = Some(scene);
    }

    /// Filled slots in narrative order.
    pub fn present(&self) -> impl Iterator<Item = (PillarKind, &PillarScene)> {
        PillarKind::ORDER
            .into_iter()
            .filter_map(|kind| self.get(kind).map(|scene| (kind, scene)))
    }

    /// True when no slot is filled.
    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
    }

    /// Timing warnings for slotted scenes, in narrative order. A transition
    /// longer than its scene is playable (the span clamps to `0`) but almost
    /// always an authoring mistake.
    pub fn timing_issues(&self) -> Vec<Issue> {
        let mut issues = Vec::new();
        for (kind, scene) in self.present() {
            let duration = scene.duration_frames();
            if scene.exit_transition_frames > duration {
                issues.push(Issue::warning(
                    IssueKind::Timing,
                    format!(
                        "{kind} pillar: exit transition ({} frames) exceeds scene duration \
                         ({duration} frames); effective span clamps to 0",
                        scene.exit_transition_frames,
                    ),
                ));
            }
        }
        issues
    }
}

#[tracing::instrument(skip(slots))]
/// Total composition length in frames: the sum of every filled slot's
/// effective span plus [`OPENING_OVERLAP_FRAMES`] for the opening fade.
/// Saturates at `u64::MAX` rather than wrapping on absurd spans.
pub fn compose_duration(slots: &PillarSlots) -> FrameIndex {
    let total = slots
        .present()
        .fold(OPENING_OVERLAP_FRAMES, |acc, (_, scene)| {
            acc.saturating_add(scene.effective_span())
        });
    FrameIndex(total)
}

#[tracing::instrument(skip(slots))]
/// Start frame of every filled slot, in narrative order.
///
/// Each scene starts where the previous scene's effective span ends, so a
/// scene's exit transition plays under its successor's entrance. Absent
/// pillars are skipped without leaving gaps. Recompute after any slot edit;
/// placements are pure outputs and never cached.
pub fn place_scenes(slots: &PillarSlots) -> BTreeMap<PillarKind, FrameIndex> {
    let mut placed = BTreeMap::new();
    let mut cursor = 0u64;
    for (kind, scene) in slots.present() {
        placed.insert(kind, FrameIndex(cursor));
        cursor = cursor.saturating_add(scene.effective_span());
    }
    tracing::debug!(placed = placed.len(), frames = cursor, "placed pillar scenes");
    placed
}

#[cfg(test)]
#[path = "../../tests/unit/composition/pillars.rs"]
mod tests;
