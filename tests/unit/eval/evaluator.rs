use super::*;
use crate::composition::model::ContentItem;
use crate::timeline::policy::DurationPolicy;

fn group_of(key: &str, n: usize) -> ContentGroup {
    ContentGroup::new(
        key,
        (0..n).map(|i| ContentItem::new(format!("{key}-{i}"), "theme")).collect(),
    )
}

fn ladder() -> Vec<ContentGroup> {
    vec![group_of("5b", 3), group_of("3b", 12), group_of("1b", 30)]
}

#[test]
fn timeline_follows_group_sizes() {
    let ev = Evaluator::new(CompositionConfig::default(), ladder()).unwrap();
    assert_eq!(ev.total_frames(), 50 + 90 + 150 + 450);
    let templates: Vec<&str> = ev
        .timeline()
        .windows()
        .iter()
        .map(|w| w.template.as_str())
        .collect();
    assert_eq!(templates, ["hero", "grid", "matrix"]);
}

#[test]
fn intro_frame_has_title_and_no_items() {
    let ev = Evaluator::new(CompositionConfig::default(), ladder()).unwrap();
    let f = ev.eval_frame(FrameIndex(0)).unwrap();
    assert_eq!(f.segment, Segment::Intro);
    assert!(f.items.is_empty());
    let title = f.title.unwrap();
    assert_eq!(title.text, "ladder");
    assert_eq!(title.position, Vec2::new(540.0, 960.0));
}

#[test]
fn slide_frames_carry_every_item() {
    let ev = Evaluator::new(CompositionConfig::default(), ladder()).unwrap();
    let f = ev.eval_frame(FrameIndex(50)).unwrap();
    assert_eq!(f.local_frame, 0);
    match &f.segment {
        Segment::Slide {
            group_index,
            key,
            template,
        } => {
            assert_eq!(*group_index, 0);
            assert_eq!(key, "5b");
            assert_eq!(template.as_str(), "hero");
        }
        other => panic!("unexpected segment: {other:?}"),
    }
    assert_eq!(f.items.len(), 3);
    // Hero cards start large and invisible.
    assert_eq!(f.items[0].scale, 3.0);
    assert_eq!(f.items[0].opacity, 0.0);

    let m = ev.eval_frame(FrameIndex(290 + 225)).unwrap();
    assert_eq!(m.items.len(), 30);
    assert!(m.items.iter().all(|i| i.column < 3));
    assert_eq!(m.title.unwrap().text, "1b");
}

#[test]
fn frames_past_the_end_hold_the_last_frame() {
    let ev = Evaluator::new(CompositionConfig::default(), ladder()).unwrap();
    let last = ev.eval_frame(FrameIndex(739)).unwrap();
    let beyond = ev.eval_frame(FrameIndex(10_000)).unwrap();
    assert_eq!(beyond.frame, FrameIndex(10_000));
    assert_eq!(beyond.local_frame, last.local_frame);
    assert_eq!(beyond.items, last.items);
}

#[test]
fn evaluation_is_order_independent() {
    let ev = Evaluator::new(CompositionConfig::default(), ladder()).unwrap();
    let forward = ev.eval_range(ev.timeline().range()).unwrap();
    for f in [600u64, 3, 420, 51, 739, 0, 290] {
        assert_eq!(ev.eval_frame(FrameIndex(f)).unwrap(), forward[f as usize]);
    }
    let parallel = ev
        .eval_range_parallel(ev.timeline().range(), Some(3))
        .unwrap();
    assert_eq!(parallel, forward);
}

#[test]
fn declared_duration_must_match() {
    let cfg = CompositionConfig {
        duration_frames: Some(1200),
        ..CompositionConfig::default()
    };
    match Evaluator::new(cfg, ladder()) {
        Err(ReelError::TimelineMismatch { declared, computed }) => {
            assert_eq!(declared, 1200);
            assert_eq!(computed, 740);
        }
        other => panic!("unexpected result: {other:?}"),
    }
    let cfg = CompositionConfig {
        duration_frames: Some(740),
        ..CompositionConfig::default()
    };
    assert!(Evaluator::new(cfg, ladder()).is_ok());
}

#[test]
fn empty_composition_is_rejected() {
    let cfg = CompositionConfig {
        intro_frames: 0,
        ..CompositionConfig::default()
    };
    assert!(matches!(
        Evaluator::new(cfg, Vec::new()),
        Err(ReelError::InvalidConfig(_))
    ));
}

#[test]
fn max_groups_limits_the_timeline() {
    let cfg = CompositionConfig {
        intro_frames: 60,
        max_groups: Some(4),
        policy: DurationPolicy::Fixed {
            template: TemplateId::new("grid"),
            duration_frames: 135,
        },
        ..CompositionConfig::default()
    };
    let groups: Vec<_> = (0..6).map(|i| group_of(&format!("s{i}"), 2)).collect();
    let ev = Evaluator::new(cfg, groups).unwrap();
    assert_eq!(ev.groups().len(), 4);
    assert_eq!(ev.total_frames(), 60 + 4 * 135);
}

#[test]
fn zero_threads_is_invalid() {
    let ev = Evaluator::new(CompositionConfig::default(), ladder()).unwrap();
    assert!(matches!(
        ev.eval_range_parallel(FrameRange::from_len(0, 4), Some(0)),
        Err(ReelError::InvalidConfig(_))
    ));
}
