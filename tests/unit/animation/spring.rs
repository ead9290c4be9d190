use super::*;

fn fps() -> Fps {
    Fps::new(30, 1).unwrap()
}

fn configs() -> [SpringConfig; 4] {
    [
        SpringConfig::default(),
        // Hero entrance: bouncy, light.
        SpringConfig {
            damping: 10.0,
            mass: 0.5,
            stiffness: 200.0,
            overshoot_clamping: false,
        },
        // Critically damped.
        SpringConfig {
            damping: 20.0,
            mass: 1.0,
            stiffness: 100.0,
            overshoot_clamping: false,
        },
        // Overdamped.
        SpringConfig {
            damping: 60.0,
            mass: 1.0,
            stiffness: 100.0,
            overshoot_clamping: false,
        },
    ]
}

#[test]
fn non_positive_frames_return_start_exactly() {
    for cfg in configs() {
        for f in [-30.0, -1.0, 0.0] {
            assert_eq!(spring(f, fps(), cfg), 0.0);
        }
    }
    let drop = SpringMotion::new(-1000.0, 0.0, SpringConfig::default()).unwrap();
    assert_eq!(drop.sample(0.0, fps()), -1000.0);
    assert_eq!(drop.sample(-5.0, fps()), -1000.0);
}

#[test]
fn settles_within_epsilon_after_measured_frame() {
    for cfg in configs() {
        let settle = measure_spring(fps(), cfg, 1e-2).unwrap();
        for f in settle..settle + 300 {
            let v = spring(f as f64, fps(), cfg);
            assert!((v - 1.0).abs() < 1e-2, "{cfg:?} frame {f}: {v}");
        }
    }
}

#[test]
fn response_is_continuous_near_start() {
    for cfg in configs() {
        let a = spring(0.001, fps(), cfg);
        assert!(a.abs() < 1e-3, "{cfg:?}: {a}");
    }
}

#[test]
fn underdamped_overshoots_and_clamping_prevents_it() {
    let cfg = SpringConfig {
        damping: 5.0,
        ..SpringConfig::default()
    };
    let peak = (0..120)
        .map(|f| spring(f as f64, fps(), cfg))
        .fold(f64::MIN, f64::max);
    assert!(peak > 1.0);

    let clamped = SpringConfig {
        overshoot_clamping: true,
        ..cfg
    };
    for f in 0..120 {
        assert!(spring(f as f64, fps(), clamped) <= 1.0);
    }
}

#[test]
fn damping_ratio_classifies_regimes() {
    let [default, _, critical, over] = configs();
    assert!(default.damping_ratio() < 1.0);
    assert!((critical.damping_ratio() - 1.0).abs() < 1e-9);
    assert!(over.damping_ratio() > 1.0);
}

#[test]
fn delay_shifts_start() {
    let m = SpringMotion::new(0.0, 1.0, SpringConfig::default())
        .unwrap()
        .with_delay(10.0)
        .unwrap();
    assert_eq!(m.sample(10.0, fps()), 0.0);
    assert_eq!(
        m.sample(25.0, fps()),
        spring(15.0, fps(), SpringConfig::default())
    );
}

#[test]
fn duration_stretch_settles_at_requested_frame() {
    let m = SpringMotion::new(0.0, 100.0, SpringConfig::default())
        .unwrap()
        .with_duration(90.0)
        .unwrap();
    let at_end = m.sample(90.0, fps());
    assert!((at_end - 100.0).abs() <= 100.0 * DEFAULT_SETTLE_THRESHOLD + 1e-9);
    let early = m.sample(30.0, fps());
    assert!((early - 100.0).abs() > 1e-3);
}

#[test]
fn invalid_configs_are_rejected() {
    for cfg in [
        SpringConfig {
            mass: 0.0,
            ..SpringConfig::default()
        },
        SpringConfig {
            stiffness: -1.0,
            ..SpringConfig::default()
        },
        SpringConfig {
            damping: f64::NAN,
            ..SpringConfig::default()
        },
    ] {
        assert!(matches!(
            SpringMotion::new(0.0, 1.0, cfg),
            Err(ReelError::InvalidConfig(_))
        ));
    }
}

#[test]
fn undamped_spring_is_rejected() {
    let cfg = SpringConfig {
        damping: 0.0,
        ..SpringConfig::default()
    };
    assert!(matches!(cfg.validate(), Err(ReelError::InvalidConfig(_))));
    assert!(SpringMotion::new(0.0, 1.0, cfg).is_err());
    assert!(measure_spring(fps(), cfg, 1e-2).is_err());
}

#[test]
fn deserializes_from_to_pair() {
    let m: SpringMotion =
        serde_json::from_str(r#"{"from":-1000,"to":0,"config":{"damping":15}}"#).unwrap();
    assert_eq!(m.start(), -1000.0);
    assert_eq!(m.target(), 0.0);
    let settled = m.sample(300.0, fps());
    assert!(settled.abs() < 1.0);
}
