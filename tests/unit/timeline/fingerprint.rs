use super::*;
use crate::descriptor::model::Cue;
use crate::foundation::core::{Fps, FrameIndex};
use crate::timeline::frame::resolve_frame;

fn state_at(frame: u64, duration: f64) -> ResolvedFrame {
    let timeline = vec![
        Cue::new(0.5, "reveal").with_target("headline").with_duration(duration),
        Cue::new(2.0, "wash"),
    ];
    resolve_frame(&timeline, FrameIndex(frame), Fps::new(30.0).unwrap())
}

#[test]
fn fingerprint_is_deterministic_for_same_state() {
    let state = state_at(40, 2.0);
    assert_eq!(fingerprint_frame(&state), fingerprint_frame(&state));
    assert_eq!(fingerprint_frame(&state), fingerprint_frame(&state.clone()));
}

#[test]
fn fingerprint_changes_with_progress() {
    let a = fingerprint_frame(&state_at(40, 2.0));
    let b = fingerprint_frame(&state_at(41, 2.0));
    assert_ne!(a, b);
}

#[test]
fn fingerprint_changes_with_cue_shape() {
    let a = fingerprint_frame(&state_at(40, 2.0));
    let b = fingerprint_frame(&state_at(40, 4.0));
    assert_ne!(a, b);

    let mut renamed = state_at(40, 2.0);
    renamed.cues[0].target = Some("subhead".to_owned());
    assert_ne!(fingerprint_frame(&renamed), fingerprint_frame(&state_at(40, 2.0)));

    let mut dropped = state_at(40, 2.0);
    dropped.cues[1].action = None;
    assert_ne!(fingerprint_frame(&dropped), fingerprint_frame(&state_at(40, 2.0)));
}

#[test]
fn empty_and_nonempty_states_differ() {
    let empty = ResolvedFrame {
        frame: FrameIndex(40),
        cues: vec![],
    };
    assert_ne!(fingerprint_frame(&empty), fingerprint_frame(&state_at(40, 2.0)));
    // Same empty state twice is stable.
    assert_eq!(fingerprint_frame(&empty), fingerprint_frame(&empty));
}
