use super::*;
use crate::schedule::beat::StaggerMode;
use crate::timeline::ease::Ease;

fn fps30() -> Fps {
    Fps::new(30.0).unwrap()
}

fn bullet_plan() -> BeatPlan {
    TemplateRegistry::builtin()
        .get("bullet_list")
        .unwrap()
        .beats
        .unwrap()
}

fn bullet_scene(timeline: &str) -> SceneDescriptor {
    let json = format!(
        r#"{{
            "template_id": "bullet_list",
            "duration_s": 10.0,
            "fps": 30.0,
            "fill": {{ "texts": {{ "b1": "First", "b2": "Second", "b3": "Third" }} }},
            "timeline": {timeline}
        }}"#
    );
    SceneDescriptor::from_json_str(&json).unwrap()
}

#[test]
fn synthesized_cues_follow_the_plan() {
    let elements = ["a".to_owned(), "b".to_owned(), "c".to_owned()];
    let cues = synthesize_reveal_cues(&elements, bullet_plan(), fps30(), Pace::Normal, 300).unwrap();

    assert_eq!(cues.len(), 3);
    for (cue, key) in cues.iter().zip(["a", "b", "c"]) {
        assert_eq!(cue.action.as_deref(), Some(REVEAL_ACTION));
        assert_eq!(cue.target.as_deref(), Some(key));
        assert_eq!(cue.duration, Some(0.6));
    }

    // Base two beats, stride one and a half, at eighteen frames per beat.
    let starts: Vec<_> = cues
        .iter()
        .map(|c| fps30().secs_to_frames_floor(c.t.unwrap()))
        .collect();
    assert_eq!(starts, vec![36, 63, 90]);
}

#[test]
fn build_in_window_never_collapses_below_one_frame() {
    let plan = BeatPlan {
        base_beats: 0.0,
        stride_beats: 1.0,
        mode: StaggerMode::FixedStride,
        build_in_beats: 0.0,
        entrance: Ease::OutCubic,
    };
    let cues = synthesize_reveal_cues(&["a".to_owned()], plan, fps30(), Pace::Normal, 300).unwrap();
    assert_eq!(cues[0].duration, Some(fps30().frames_to_secs(1)));
}

#[test]
fn empty_element_list_synthesizes_nothing() {
    let cues = synthesize_reveal_cues(&[], bullet_plan(), fps30(), Pace::Normal, 300).unwrap();
    assert!(cues.is_empty());
}

#[test]
fn proportional_plans_settle_before_the_scene_tail() {
    let json = r#"{
        "template_id": "fact_stack",
        "duration_s": 10.0,
        "fps": 30.0,
        "fill": { "texts": { "f1": "A", "f2": "B", "f3": "C" } }
    }"#;
    let scene = SceneDescriptor::from_json_str(json).unwrap();
    let prepared = PreparedScene::prepare(scene, TemplateRegistry::builtin()).unwrap();

    assert_eq!(prepared.cues()[0].t, Some(0.9));
    for key in ["f1", "f2", "f3"] {
        assert_eq!(prepared.progress(REVEAL_ACTION, Some(key), FrameIndex(0)), 0.0);
        assert_eq!(prepared.progress(REVEAL_ACTION, Some(key), FrameIndex(255)), 1.0);
    }
}

#[test]
fn cue_driven_scenes_keep_their_authored_timeline() {
    let json = r#"{
        "template_id": "diagram_flow",
        "duration_s": 10.0,
        "fps": 30.0,
        "fill": { "texts": { "stepA": "Fetch", "stepB": "Decode" } },
        "timeline": [
            { "t": 0.5, "action": "reveal", "target": "stepA" },
            { "t": 2.0, "action": "draw", "target": "stepA->stepB", "duration": 1.5 }
        ]
    }"#;
    let scene = SceneDescriptor::from_json_str(json).unwrap();
    let authored = scene.timeline.clone().unwrap();
    let prepared = PreparedScene::prepare(scene, TemplateRegistry::builtin()).unwrap();

    assert_eq!(prepared.cues(), authored.as_slice());
    assert_eq!(prepared.total_frames(), 300);
}

#[test]
fn beat_driven_scenes_synthesize_their_reveals() {
    let scene = bullet_scene("[]");
    let prepared = PreparedScene::prepare(scene, TemplateRegistry::builtin()).unwrap();

    assert_eq!(prepared.cues().len(), 3);
    // Windows land at [36, 54), [63, 81), [90, 108).
    assert_eq!(prepared.progress(REVEAL_ACTION, Some("b1"), FrameIndex(54)), 1.0);
    assert_eq!(prepared.progress(REVEAL_ACTION, Some("b2"), FrameIndex(54)), 0.0);
    assert_eq!(prepared.progress(REVEAL_ACTION, Some("b2"), FrameIndex(72)), 0.5);
    assert_eq!(prepared.progress(REVEAL_ACTION, Some("b3"), FrameIndex(299)), 1.0);
}

#[test]
fn entrance_follows_the_template_plan() {
    let prepared = PreparedScene::prepare(bullet_scene("[]"), TemplateRegistry::builtin()).unwrap();
    assert_eq!(prepared.entrance(), Ease::OutCubic);

    // b2's window is [63, 81); frame 72 is its linear midpoint, and
    // OutCubic(0.5) is exactly 0.875.
    assert_eq!(prepared.reveal_progress("b2", FrameIndex(63)), 0.0);
    assert_eq!(prepared.reveal_progress("b2", FrameIndex(72)), 0.875);
    assert_eq!(prepared.reveal_progress("b2", FrameIndex(299)), 1.0);
}

#[test]
fn reveal_progress_shapes_the_window_with_the_entrance_curve() {
    let json = r#"{
        "template_id": "icon_grid",
        "duration_s": 10.0,
        "fps": 30.0,
        "fill": { "texts": { "i1": "Sun", "i2": "Moon" } }
    }"#;
    let scene = SceneDescriptor::from_json_str(json).unwrap();
    let prepared = PreparedScene::prepare(scene, TemplateRegistry::builtin()).unwrap();
    assert_eq!(prepared.entrance(), Ease::OutBack);

    // Frame 40 sits inside i1's build-in window, which opens at frame 36.
    let linear = prepared.progress(REVEAL_ACTION, Some("i1"), FrameIndex(40));
    assert!(linear > 0.0 && linear < 1.0);
    assert_eq!(
        prepared.reveal_progress("i1", FrameIndex(40)),
        Ease::OutBack.apply(linear)
    );
}

#[test]
fn authored_accents_append_after_synthesized_reveals() {
    let scene = bullet_scene(r#"[{ "t": 9.0, "action": "pulse", "target": "anchor" }]"#);
    let prepared = PreparedScene::prepare(scene, TemplateRegistry::builtin()).unwrap();

    assert_eq!(prepared.cues().len(), 4);
    let last = prepared.cues().last().unwrap();
    assert_eq!(last.action.as_deref(), Some("pulse"));
    assert_eq!(prepared.progress("pulse", Some("anchor"), FrameIndex(285)), 0.5);
}

#[test]
fn explicit_sequence_orders_the_reveals() {
    let json = r#"{
        "template_id": "bullet_list",
        "duration_s": 10.0,
        "fps": 30.0,
        "fill": {
            "texts": { "alpha": "A", "zeta": "Z" },
            "sequence": ["zeta", "alpha"]
        }
    }"#;
    let scene = SceneDescriptor::from_json_str(json).unwrap();
    let prepared = PreparedScene::prepare(scene, TemplateRegistry::builtin()).unwrap();

    let targets: Vec<_> = prepared
        .cues()
        .iter()
        .map(|c| c.target.as_deref().unwrap())
        .collect();
    assert_eq!(targets, vec!["zeta", "alpha"]);
    assert!(prepared.cues()[0].t < prepared.cues()[1].t);
}

#[test]
fn slow_pace_pushes_the_schedule_out() {
    let normal = PreparedScene::prepare(bullet_scene("[]"), TemplateRegistry::builtin()).unwrap();

    let mut scene = bullet_scene("[]");
    scene
        .style_tokens
        .insert("pace".to_owned(), serde_json::json!("slow"));
    let slow = PreparedScene::prepare(scene, TemplateRegistry::builtin()).unwrap();

    let first = |p: &PreparedScene| p.cues()[0].t.unwrap();
    assert!(first(&slow) > first(&normal));
}

#[test]
fn prepare_rejects_degenerate_scenes() {
    let registry = TemplateRegistry::builtin();

    let mut scene = bullet_scene("[]");
    scene.fps = 0.0;
    assert!(PreparedScene::prepare(scene, registry).is_err());

    let mut scene = bullet_scene("[]");
    scene.duration_s = -3.0;
    assert!(PreparedScene::prepare(scene, registry).is_err());

    let mut scene = bullet_scene("[]");
    scene.template_id = "mystery_template".to_owned();
    assert!(PreparedScene::prepare(scene, registry).is_err());
}

#[test]
fn frame_state_snapshots_the_prepared_timeline() {
    let prepared = PreparedScene::prepare(bullet_scene("[]"), TemplateRegistry::builtin()).unwrap();
    let state = prepared.frame_state(FrameIndex(72));

    assert_eq!(state.frame, FrameIndex(72));
    let progresses: Vec<_> = state.cues.iter().map(|c| c.progress).collect();
    assert_eq!(progresses, vec![1.0, 0.5, 0.0]);
}
