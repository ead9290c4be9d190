use super::*;
use crate::composition::model::ContentItem;

fn table() -> ThresholdTable {
    ThresholdTable::new(vec![
        ThresholdBucket::up_to(4, "A", 90),
        ThresholdBucket::up_to(20, "B", 150),
        ThresholdBucket::rest("C", 450),
    ])
    .unwrap()
}

fn group_of(n: usize) -> ContentGroup {
    ContentGroup::new(
        "g",
        (0..n).map(|i| ContentItem::new(format!("s{i}"), "t")).collect(),
    )
}

#[test]
fn bucket_boundaries_are_inclusive() {
    let t = table();
    assert_eq!(t.select(0).as_str(), "A");
    assert_eq!(t.select(4).as_str(), "A");
    assert_eq!(t.select(5).as_str(), "B");
    assert_eq!(t.select(20).as_str(), "B");
    assert_eq!(t.select(21).as_str(), "C");
    assert_eq!(t.select(usize::MAX).as_str(), "C");
}

#[test]
fn selection_uses_declared_count() {
    let t = table();
    let g = group_of(3).with_count(92);
    assert_eq!(select_template(&g, &t).as_str(), "C");
    assert_eq!(select_template(&group_of(3), &t).as_str(), "A");
}

#[test]
fn selection_is_monotonic_across_the_table() {
    let t = table();
    let rank = |id: &TemplateId| {
        t.buckets()
            .iter()
            .position(|b| &b.template == id)
            .unwrap()
    };
    let mut prev_rank = 0;
    let mut prev_duration = 0;
    for n in 0..200 {
        let b = t.bucket_for(n);
        assert!(rank(&b.template) >= prev_rank, "count {n}");
        assert!(b.duration_frames >= prev_duration, "count {n}");
        prev_rank = rank(&b.template);
        prev_duration = b.duration_frames;
    }
}

#[test]
fn non_exhaustive_table_is_rejected() {
    let err = ThresholdTable::new(vec![
        ThresholdBucket::up_to(4, "A", 90),
        ThresholdBucket::up_to(20, "B", 150),
    ])
    .unwrap_err();
    assert!(matches!(err, ReelError::InvalidConfig(_)));
    assert!(ThresholdTable::new(vec![]).is_err());
}

#[test]
fn unordered_or_shrinking_buckets_are_rejected() {
    assert!(
        ThresholdTable::new(vec![
            ThresholdBucket::up_to(20, "A", 90),
            ThresholdBucket::up_to(4, "B", 150),
            ThresholdBucket::rest("C", 450),
        ])
        .is_err()
    );
    assert!(
        ThresholdTable::new(vec![
            ThresholdBucket::up_to(4, "A", 150),
            ThresholdBucket::rest("B", 90),
        ])
        .is_err()
    );
    assert!(
        ThresholdTable::new(vec![
            ThresholdBucket::rest("A", 90),
            ThresholdBucket::rest("B", 150),
        ])
        .is_err()
    );
    assert!(ThresholdTable::new(vec![ThresholdBucket::rest("A", 0)]).is_err());
}

#[test]
fn template_cannot_return_after_a_larger_one() {
    assert!(
        ThresholdTable::new(vec![
            ThresholdBucket::up_to(4, "A", 90),
            ThresholdBucket::up_to(20, "B", 150),
            ThresholdBucket::rest("A", 450),
        ])
        .is_err()
    );
    // Consecutive buckets may share a template.
    assert!(
        ThresholdTable::new(vec![
            ThresholdBucket::up_to(4, "A", 90),
            ThresholdBucket::up_to(10, "A", 120),
            ThresholdBucket::rest("B", 450),
        ])
        .is_ok()
    );
}

#[test]
fn parses_from_json_array() {
    let t: ThresholdTable = serde_json::from_str(
        r#"[
            {"max_count": 4, "template": "hero", "duration_frames": 90},
            {"max_count": 20, "template": "grid", "duration_frames": 150},
            {"template": "matrix", "duration_frames": 450}
        ]"#,
    )
    .unwrap();
    assert_eq!(t, ThresholdTable::default());
    assert!(serde_json::from_str::<ThresholdTable>("[]").is_err());
}
