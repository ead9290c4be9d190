use super::*;

const ALL: [Ease; 8] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
    Ease::CSS_EASE,
];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert!((ease.apply(0.0) - 0.0).abs() < 1e-9, "{ease:?}");
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-9, "{ease:?}");
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b, "{ease:?}");
        assert!(b < c, "{ease:?}");
    }
}

#[test]
fn linear_bezier_is_identity() {
    let ease = Ease::CubicBezier {
        x1: 0.0,
        y1: 0.0,
        x2: 1.0,
        y2: 1.0,
    };
    for t in [0.1, 0.33, 0.5, 0.9] {
        assert!((ease.apply(t) - t).abs() < 1e-4);
    }
}

#[test]
fn out_of_range_input_is_clamped() {
    assert_eq!(Ease::OutCubic.apply(-3.0), 0.0);
    assert_eq!(Ease::OutCubic.apply(7.0), 1.0);
}

#[test]
fn parses_snake_case_names() {
    let ease: Ease = serde_json::from_str("\"in_out_cubic\"").unwrap();
    assert_eq!(ease, Ease::InOutCubic);
    let ease: Ease =
        serde_json::from_str(r#"{"cubic_bezier":{"x1":0.4,"y1":0.0,"x2":0.2,"y2":1.0}}"#).unwrap();
    assert!(matches!(ease, Ease::CubicBezier { .. }));
    assert!(ease.is_finite());
}
