//! Allocate a ladder timeline in code and print a few evaluated frames.
//!
//! Run with `cargo run --example plan_ladder`.

use slidereel::{
    CompositionConfig, ContentGroup, ContentItem, Evaluator, FrameIndex, Segment,
};

fn board(key: &str, n: usize) -> ContentGroup {
    let items = (0..n)
        .map(|i| {
            let item = ContentItem::new(format!("{key}-{i:02}"), "theme");
            if i % 4 == 0 { item.emphasized() } else { item }
        })
        .collect();
    ContentGroup::new(key, items)
}

fn main() -> anyhow::Result<()> {
    let groups = vec![board("6b", 2), board("3b", 8), board("1b", 41)];
    let ev = Evaluator::new(CompositionConfig::default(), groups)?;

    println!("total frames: {}", ev.total_frames());
    for w in ev.timeline().windows() {
        println!(
            "  group {} -> {:<6} frames {:>4}..{:<4}",
            w.group_index,
            w.template,
            w.start.0,
            w.range().end.0
        );
    }

    for f in [0, 60, 200, 400, 700] {
        let frame = ev.eval_frame(FrameIndex(f))?;
        let label = match &frame.segment {
            Segment::Intro => "intro".to_owned(),
            Segment::Slide { key, template, .. } => format!("{template} {key}"),
        };
        let visible = frame
            .items
            .iter()
            .filter(|i| i.opacity > 0.0 && (-200.0..1920.0).contains(&i.position.y))
            .count();
        println!(
            "frame {f:>4}: {label:<12} local {:>3}, {visible}/{} cards on screen",
            frame.local_frame,
            frame.items.len()
        );
    }
    Ok(())
}
