//! Cueframe is a deterministic timing engine for short educational clips.
//!
//! Cueframe turns a JSON scene descriptor into per-frame visual state: which
//! cues are live at a frame and how far along each reveal is. It decides
//! *when* things happen; renderers decide how they look. Every answer is a
//! pure function of the descriptor and the frame index, so any frame can be
//! resolved in any order, on any thread, with identical results.
//!
//! # Pipeline overview
//!
//! 1. **Parse**: JSON -> [`SceneDescriptor`] (lenient; only unparseable JSON fails)
//! 2. **Validate**: [`validate`] accumulates [`Issue`]s; blocking errors stop activation
//! 3. **Prepare**: [`PreparedScene::prepare`] binds the descriptor to its effective
//!    timeline, synthesizing reveals for beat-driven templates
//! 4. **Resolve**: [`resolve_frame`] / [`resolve_frames`] snapshot per-cue progress,
//!    fingerprintable via [`fingerprint_frame`]
//! 5. **Compose** (optional): [`place_scenes`] chains pillar scenes with
//!    exit-transition overlaps
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: resolution is pure and stable for a given input.
//! - **No IO past the boundary**: descriptor loading is the only place that touches
//!   a reader; per-frame queries never do.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod composition;
mod descriptor;
mod foundation;
mod schedule;
mod timeline;

pub use composition::pillars::{
    OPENING_OVERLAP_FRAMES, PillarKind, PillarScene, PillarSlots, compose_duration, place_scenes,
};
pub use descriptor::model::{
    ANCHOR_TARGET, CONNECTOR_SEPARATOR, Cue, DEFAULT_CUE_DURATION_SECS, Fill, Layout, Meta,
    STYLE_TOKEN_PACE, SceneDescriptor, is_connector_target,
};
pub use descriptor::registry::{BeatPlan, TemplateFamily, TemplateInfo, TemplateRegistry};
pub use descriptor::validate::{
    Issue, IssueKind, MAX_TEXT_LEN, Severity, issues_block_activation, validate,
};
pub use foundation::core::{CanvasSize, Fps, FrameIndex, FrameRange};
pub use foundation::error::{CueframeError, CueframeResult};
pub use schedule::beat::{
    BASE_BEAT_SECS, BeatClock, BeatScheduler, DEFAULT_BUILD_IN_SECS, Pace, SETTLE_FRACTION,
    StaggerMode,
};
pub use schedule::synth::{PreparedScene, REVEAL_ACTION, synthesize_reveal_cues};
pub use timeline::ease::Ease;
pub use timeline::fingerprint::{FrameFingerprint, fingerprint_frame};
pub use timeline::frame::{
    ResolveThreading, ResolvedCue, ResolvedFrame, resolve_frame, resolve_frames,
    resolve_frames_with,
};
pub use timeline::resolver::{
    find_all_cues, find_cue, resolve_cue_progress, resolve_progress, resolve_progress_eased,
};
