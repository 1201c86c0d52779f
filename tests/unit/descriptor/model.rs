use super::*;

#[test]
fn empty_object_parses_with_defaults() {
    let d = SceneDescriptor::from_json_str("{}").unwrap();
    assert_eq!(d.schema_version, "");
    assert_eq!(d.template_id, "");
    assert_eq!(d.duration_s, 0.0);
    assert_eq!(d.fps, 0.0);
    assert!(d.timeline.is_none());
    assert!(d.fill.is_none());
    assert!(d.defects.is_empty());
}

#[test]
fn full_descriptor_parses_and_preserves_opaque_payloads() {
    let s = r#"{
        "schema_version": "2.1",
        "template_id": "diagram_flow",
        "duration_s": 12.0,
        "fps": 30,
        "meta": {"title": "Photosynthesis", "tags": ["biology"]},
        "style_tokens": {"palette": "ocean", "pace": "fast", "weight": 2},
        "layout": {"canvas": {"w": 1920, "h": 1080}, "columns": 3},
        "fill": {
            "texts": {"stepA": "Light absorbed", "stepB": "Sugar produced"},
            "images": {"icon": "leaf.png"},
            "diagram": {"arrows": true}
        },
        "timeline": [
            {"t": 0.5, "action": "reveal", "target": "stepA"},
            {"t": 2.0, "action": "draw", "target": "stepA->stepB", "duration": 1.5}
        ],
        "unknown_future_field": true
    }"#;
    let d = SceneDescriptor::from_json_str(s).unwrap();
    assert_eq!(d.template_id, "diagram_flow");
    assert_eq!(d.layout.canvas.w, 1920.0);
    assert_eq!(d.layout.extra.get("columns"), Some(&serde_json::json!(3)));
    assert_eq!(d.style_tokens.get("weight"), Some(&serde_json::json!(2)));
    let fill = d.fill.as_ref().unwrap();
    assert_eq!(fill.texts.len(), 2);
    assert!(fill.extra.contains_key("diagram"));
    let timeline = d.timeline.as_ref().unwrap();
    assert_eq!(timeline.len(), 2);
    assert_eq!(timeline[1].duration, Some(1.5));
    assert!(d.defects.is_empty());
}

#[test]
fn unparseable_json_is_a_structural_error() {
    let err = SceneDescriptor::from_json_str("{not json").unwrap_err();
    assert!(err.to_string().contains("structural error:"));
}

#[test]
fn from_value_accepts_preparsed_json() {
    let v = serde_json::json!({"template_id": "title_card", "duration_s": 4.0, "fps": 24});
    let d = SceneDescriptor::from_value(v).unwrap();
    assert_eq!(d.template_id, "title_card");
    assert_eq!(d.fps, 24.0);
}

#[test]
fn wrong_typed_fields_fall_back_and_record_defects() {
    let s = r#"{"template_id": "title_card", "duration_s": "ten", "fps": 24}"#;
    let d = SceneDescriptor::from_json_str(s).unwrap();
    assert_eq!(d.template_id, "title_card");
    assert_eq!(d.duration_s, 0.0);
    assert_eq!(d.fps, 24.0);
    assert_eq!(d.defects.len(), 1);
    assert_eq!(d.defects[0].field, "duration_s");
    assert!(d.defects[0].message.contains("invalid type"));
}

#[test]
fn non_object_documents_load_with_a_document_defect() {
    let d = SceneDescriptor::from_value(serde_json::json!([1, 2, 3])).unwrap();
    assert_eq!(d.defects.len(), 1);
    assert_eq!(d.defects[0].field, "$");
    assert!(d.fill.is_none());
    assert!(d.timeline.is_none());
}

#[test]
fn mistyped_containers_stay_present_with_defaults() {
    let d = SceneDescriptor::from_json_str(r#"{"fill": 17, "timeline": "soon"}"#).unwrap();
    let fill = d.fill.as_ref().unwrap();
    assert!(fill.texts.is_empty());
    assert!(fill.images.is_empty());
    assert!(fill.extra.is_empty());
    assert_eq!(d.timeline, Some(Vec::new()));
    let fields: Vec<&str> = d.defects.iter().map(|defect| defect.field).collect();
    assert_eq!(fields, vec!["fill", "timeline"]);
}

#[test]
fn cue_start_clamps_missing_and_negative_times() {
    assert_eq!(Cue::new(-2.0, "reveal").start_secs(), 0.0);
    let draft = Cue {
        t: None,
        ..Cue::new(0.0, "reveal")
    };
    assert_eq!(draft.start_secs(), 0.0);
    assert_eq!(Cue::new(f64::NAN, "reveal").start_secs(), 0.0);
}

#[test]
fn cue_duration_defaults_and_collapses() {
    assert_eq!(Cue::new(0.0, "reveal").duration_secs(), DEFAULT_CUE_DURATION_SECS);
    assert_eq!(Cue::new(0.0, "reveal").with_duration(2.5).duration_secs(), 2.5);
    assert_eq!(Cue::new(0.0, "reveal").with_duration(0.0).duration_secs(), 0.0);
    assert_eq!(Cue::new(0.0, "reveal").with_duration(-1.0).duration_secs(), 0.0);
    assert_eq!(
        Cue::new(0.0, "reveal").with_duration(f64::NAN).duration_secs(),
        0.0
    );
}

#[test]
fn cue_matching_is_exact_on_target() {
    let scoped = Cue::new(1.0, "reveal").with_target("headline");
    let scene_wide = Cue::new(1.0, "wash");
    assert!(scoped.matches("reveal", Some("headline")));
    assert!(!scoped.matches("reveal", None));
    assert!(!scoped.matches("reveal", Some("subhead")));
    assert!(!scoped.matches("underline", Some("headline")));
    assert!(scene_wide.matches("wash", None));
    assert!(!scene_wide.matches("wash", Some("headline")));
}

#[test]
fn connector_targets_are_recognized() {
    assert!(is_connector_target("a->b"));
    assert!(is_connector_target("stepA -> stepB"));
    assert!(!is_connector_target("headline"));
    assert!(!is_connector_target(ANCHOR_TARGET));
}

#[test]
fn pace_token_resolves_with_fallback() {
    let mut d = SceneDescriptor::from_json_str("{}").unwrap();
    assert_eq!(d.pace(), Pace::Normal);
    d.style_tokens
        .insert(STYLE_TOKEN_PACE.into(), serde_json::json!("slow"));
    assert_eq!(d.pace(), Pace::Slow);
    d.style_tokens
        .insert(STYLE_TOKEN_PACE.into(), serde_json::json!("frantic"));
    assert_eq!(d.pace(), Pace::Normal);
    d.style_tokens
        .insert(STYLE_TOKEN_PACE.into(), serde_json::json!(3));
    assert_eq!(d.pace(), Pace::Normal);
}

#[test]
fn duration_frames_floors_and_guards() {
    let mut d = SceneDescriptor::from_json_str("{}").unwrap();
    d.duration_s = 10.0;
    d.fps = 30.0;
    assert_eq!(d.duration_frames(), 300);
    d.duration_s = 1.999;
    assert_eq!(d.duration_frames(), 59);
    d.duration_s = -3.0;
    assert_eq!(d.duration_frames(), 0);
    d.duration_s = 10.0;
    d.fps = f64::NAN;
    assert_eq!(d.duration_frames(), 0);
}

#[test]
fn fill_sequence_prefers_explicit_order() {
    let s = r#"{
        "fill": {
            "texts": {"b": "second", "a": "first", "c": "third"},
            "sequence": ["c", "a"]
        }
    }"#;
    let d = SceneDescriptor::from_json_str(s).unwrap();
    assert_eq!(
        d.fill.unwrap().sequence(),
        vec!["c".to_owned(), "a".to_owned()]
    );

    let sorted = SceneDescriptor::from_json_str(
        r#"{"fill": {"texts": {"b": "x", "a": "y"}}}"#,
    )
    .unwrap();
    assert_eq!(
        sorted.fill.unwrap().sequence(),
        vec!["a".to_owned(), "b".to_owned()]
    );
}

#[test]
fn absent_option_fields_are_skipped_on_serialize() {
    let cue = Cue::new(1.0, "reveal");
    let json = serde_json::to_value(&cue).unwrap();
    let obj = json.as_object().unwrap();
    assert!(obj.contains_key("t"));
    assert!(obj.contains_key("action"));
    assert!(!obj.contains_key("target"));
    assert!(!obj.contains_key("duration"));
}
