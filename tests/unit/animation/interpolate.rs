use super::*;

#[test]
fn interpolates_between_breakpoints() {
    let v = interpolate(5.0, &[0.0, 10.0], &[0.0, 100.0], InterpolateOptions::clamp()).unwrap();
    assert_eq!(v, 50.0);
    let v = interpolate(
        15.0,
        &[10.0, 15.0, 20.0, 25.0],
        &[0.0, -10.0, 10.0, 0.0],
        InterpolateOptions::clamp(),
    )
    .unwrap();
    assert_eq!(v, -10.0);
}

#[test]
fn frames_before_range_return_start_value_exactly() {
    let interp = Interpolator::new(
        vec![0.0, 50.0],
        vec![-1000.0, 0.0],
        InterpolateOptions::clamp(),
    )
    .unwrap();
    for f in [-100.0, -1.0, 0.0] {
        assert_eq!(interp.sample(f), -1000.0);
    }
}

#[test]
fn clamp_and_extend_differ_outside_range() {
    let clamp = InterpolateOptions::clamp();
    let extend = InterpolateOptions::extend();
    assert_eq!(
        interpolate(20.0, &[0.0, 10.0], &[0.0, 1.0], clamp).unwrap(),
        1.0
    );
    assert_eq!(
        interpolate(20.0, &[0.0, 10.0], &[0.0, 1.0], extend).unwrap(),
        2.0
    );
    assert_eq!(
        interpolate(-10.0, &[0.0, 10.0], &[0.0, 1.0], extend).unwrap(),
        -1.0
    );
}

#[test]
fn mixed_extrapolation_is_per_side() {
    let opts = InterpolateOptions {
        extrapolate_left: Extrapolate::Extend,
        extrapolate_right: Extrapolate::Clamp,
        ease: Ease::Linear,
    };
    let i = Interpolator::new(vec![0.0, 450.0], vec![1920.0, -5000.0], opts).unwrap();
    assert_eq!(i.sample(900.0), -5000.0);
    assert!(i.sample(-450.0) > 1920.0);
}

#[test]
fn repeated_breakpoints_resolve_to_later_output() {
    let i = Interpolator::new(
        vec![0.0, 10.0, 10.0, 20.0],
        vec![0.0, 1.0, 5.0, 6.0],
        InterpolateOptions::clamp(),
    )
    .unwrap();
    assert_eq!(i.sample(10.0), 5.0);
    assert_eq!(i.sample(5.0), 0.5);
    assert_eq!(i.sample(15.0), 5.5);
}

#[test]
fn easing_shapes_segment_progress() {
    let opts = InterpolateOptions::clamp().with_ease(Ease::InQuad);
    let v = interpolate(5.0, &[0.0, 10.0], &[0.0, 100.0], opts).unwrap();
    assert!((v - 25.0).abs() < 1e-9);
}

#[test]
fn invalid_ranges_are_rejected() {
    let opts = InterpolateOptions::clamp();
    for (input, output) in [
        (vec![], vec![]),
        (vec![0.0], vec![1.0]),
        (vec![0.0, 1.0], vec![1.0]),
        (vec![1.0, 0.0], vec![0.0, 1.0]),
        (vec![0.0, f64::INFINITY], vec![0.0, 1.0]),
    ] {
        let err = Interpolator::new(input, output, opts).unwrap_err();
        assert!(matches!(err, ReelError::InvalidConfig(_)));
    }
}

#[test]
fn nan_probe_does_not_panic() {
    let i =
        Interpolator::new(vec![0.0, 1.0], vec![3.0, 4.0], InterpolateOptions::extend()).unwrap();
    assert_eq!(i.sample(f64::NAN), 3.0);
}

#[test]
fn deserializes_with_flattened_options() {
    let i: Interpolator = serde_json::from_str(
        r#"{"input":[0,20,40,50],"output":[0,1,1,0],"extrapolate_right":"extend"}"#,
    )
    .unwrap();
    assert_eq!(i.sample(30.0), 1.0);
    assert_eq!(i.sample(45.0), 0.5);

    let bad = serde_json::from_str::<Interpolator>(r#"{"input":[0],"output":[0]}"#);
    assert!(bad.is_err());
}
