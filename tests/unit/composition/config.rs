use super::*;
use crate::composition::model::ContentItem;

fn group(key: &str) -> ContentGroup {
    ContentGroup::new(key, vec![ContentItem::new("a", "b")])
}

#[test]
fn default_config_is_valid_and_covers_policy_templates() {
    let cfg = CompositionConfig::default();
    cfg.validate().unwrap();
    for t in ["hero", "grid", "matrix"] {
        assert!(cfg.template(&TemplateId::new(t)).is_ok());
    }
    assert!(cfg.template(&TemplateId::new("nope")).is_err());
}

#[test]
fn empty_object_parses_to_defaults() {
    let cfg = CompositionConfig::from_reader("{}".as_bytes()).unwrap();
    assert_eq!(cfg, CompositionConfig::default());
}

#[test]
fn default_round_trips_through_json() {
    let cfg = CompositionConfig::default();
    let s = serde_json::to_string(&cfg).unwrap();
    let back = CompositionConfig::from_reader(s.as_bytes()).unwrap();
    assert_eq!(back, cfg);
}

#[test]
fn missing_template_is_invalid_config() {
    let cfg = CompositionConfig::from_reader(
        r#"{
            "policy": {"kind": "fixed", "template": "list", "duration_frames": 135},
            "templates": {}
        }"#
        .as_bytes(),
    )
    .unwrap();
    let err = cfg.validate().unwrap_err();
    assert!(matches!(err, ReelError::InvalidConfig(_)));
    assert!(err.to_string().contains("list"));
}

#[test]
fn parses_custom_slide_kinds() {
    let cfg = CompositionConfig::from_reader(
        r#"{
            "id": "news",
            "intro_frames": 40,
            "duration_frames": 600,
            "policy": {"kind": "fixed", "template": "scroll", "duration_frames": 560},
            "templates": {
                "scroll": {
                    "kind": "parallax",
                    "columns": 1,
                    "speeds": [1.0],
                    "start_y": 0,
                    "overscan": 0,
                    "wobble": null,
                    "title": {"opacity": {"keyframes": {"input": [0, 20], "output": [0, 1]}}}
                }
            }
        }"#
        .as_bytes(),
    )
    .unwrap();
    cfg.validate().unwrap();
    assert_eq!(cfg.duration_frames, Some(600));
    let spec = cfg.template(&TemplateId::new("scroll")).unwrap();
    match &spec.kind {
        SlideKind::Parallax(p) => {
            assert_eq!(p.columns, 1);
            assert_eq!(p.start_y, Some(0.0));
            assert!(p.wobble.is_none());
            assert_eq!(p.fade_frames, 30);
        }
        other => panic!("unexpected slide kind: {other:?}"),
    }
    assert_eq!(spec.title_y, 120.0);
    assert!(matches!(spec.title.opacity, Motion::Keyframes(_)));
    assert_eq!(spec.title.scale, Motion::Constant(1.0));
}

#[test]
fn nested_spec_errors_name_the_template() {
    let cfg = CompositionConfig::from_reader(
        r#"{
            "policy": {"kind": "fixed", "template": "list", "duration_frames": 10},
            "templates": {"list": {"kind": "stagger", "columns": 0}}
        }"#
        .as_bytes(),
    )
    .unwrap();
    let err = cfg.validate().unwrap_err().to_string();
    assert!(err.starts_with("invalid config: template 'list'"), "{err}");
}

#[test]
fn invalid_motion_fails_at_parse_time() {
    let err = CompositionConfig::from_reader(
        r#"{"intro": {"scale": {"keyframes": {"input": [0], "output": [1]}}}}"#.as_bytes(),
    )
    .unwrap_err();
    assert!(matches!(err, ReelError::Serde(_)));
}

#[test]
fn intro_fields_are_flattened() {
    let cfg = CompositionConfig::from_reader(
        r#"{"intro": {"text": "Limit-up ladder", "translate_y": {"spring": {"from": -1000, "to": 0, "config": {"damping": 15}}}}}"#
            .as_bytes(),
    )
    .unwrap();
    assert_eq!(cfg.intro.text.as_deref(), Some("Limit-up ladder"));
    assert!(matches!(cfg.intro.title.translate_y, Motion::Spring(_)));
    assert_eq!(cfg.intro.title.opacity, Motion::Constant(1.0));
}

#[test]
fn max_groups_truncates() {
    let groups: Vec<_> = ["a", "b", "c", "d", "e"].into_iter().map(group).collect();
    let mut cfg = CompositionConfig::default();
    assert_eq!(cfg.select_groups(&groups).len(), 5);
    cfg.max_groups = Some(4);
    let picked = cfg.select_groups(&groups);
    assert_eq!(picked.len(), 4);
    assert_eq!(picked[3].key, "d");
    cfg.max_groups = Some(10);
    assert_eq!(cfg.select_groups(&groups).len(), 5);
}

#[test]
fn bad_canvas_and_fps_are_rejected() {
    let mut cfg = CompositionConfig::default();
    cfg.canvas.width = 0;
    assert!(cfg.validate().is_err());
    let mut cfg = CompositionConfig::default();
    cfg.fps.den = 0;
    assert!(cfg.validate().is_err());
}

#[test]
fn io_and_parse_errors_are_distinguished() {
    assert!(matches!(
        CompositionConfig::from_path("/definitely/not/here.json"),
        Err(ReelError::Other(_))
    ));
    assert!(matches!(
        CompositionConfig::from_reader("{not json".as_bytes()),
        Err(ReelError::Serde(_))
    ));
}
