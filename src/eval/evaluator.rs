use rayon::prelude::*;

use crate::composition::config::{CompositionConfig, SlideKind, TitleSpec};
use crate::composition::model::ContentGroup;
use crate::foundation::core::{FrameIndex, FrameRange, Vec2};
use crate::foundation::error::{ReelError, ReelResult};
use crate::layout::parallax::ItemPlacement;
use crate::timeline::allocator::{Placement, Timeline, TimelineWindow, allocate};
use crate::timeline::selector::TemplateId;

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Which part of the timeline a frame belongs to.
pub enum Segment {
    /// The opening title card.
    Intro,
    /// A group window.
    Slide {
        /// Index of the group in the allocated list.
        group_index: usize,
        /// Grouping key of that group.
        key: String,
        /// Template rendering the group.
        template: TemplateId,
    },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Resolved heading of a segment.
pub struct TitleTransform {
    /// Heading text.
    pub text: String,
    /// Anchor (center) position in canvas pixels.
    pub position: Vec2,
    /// Uniform scale.
    pub scale: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Rotation in degrees.
    pub rotation_deg: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Resolved transform of one card.
pub struct ItemTransform {
    /// Group the item belongs to.
    pub group_index: usize,
    /// Index of the item within its group.
    pub item_index: usize,
    /// Column the card is laid out in.
    pub column: usize,
    /// Top-center of the card in canvas pixels.
    pub position: Vec2,
    /// Uniform scale.
    pub scale: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Rotation in degrees.
    pub rotation_deg: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Everything the compositor needs to draw one frame.
pub struct EvaluatedFrame {
    /// Requested frame.
    pub frame: FrameIndex,
    /// Active segment.
    pub segment: Segment,
    /// Frame offset within the segment.
    pub local_frame: u64,
    /// Segment heading.
    pub title: Option<TitleTransform>,
    /// Cards in group order; never culled.
    pub items: Vec<ItemTransform>,
}

/// Stateless evaluator from (configuration, content, frame) to transforms.
///
/// Construction validates the configuration and allocates the timeline once; every
/// `eval_*` call afterwards is a pure function of the frame, so frames may be requested
/// in any order and from any thread.
#[derive(Debug)]
pub struct Evaluator {
    config: CompositionConfig,
    groups: Vec<ContentGroup>,
    timeline: Timeline,
}

impl Evaluator {
    #[tracing::instrument(skip(config, groups), fields(id = %config.id))]
    /// Validate `config`, allocate the timeline for `groups` and enforce the declared duration.
    pub fn new(config: CompositionConfig, groups: Vec<ContentGroup>) -> ReelResult<Self> {
        config.validate()?;
        let mut groups = groups;
        groups.truncate(config.select_groups(&groups).len());

        let timeline = allocate(&groups, config.intro_frames, &config.policy)?;
        if timeline.total_frames() == 0 {
            return Err(ReelError::invalid_config(
                "composition has no frames: intro is empty and there are no groups",
            ));
        }
        if let Some(declared) = config.duration_frames {
            timeline.ensure_declared(declared)?;
        }
        tracing::info!(
            groups = groups.len(),
            total_frames = timeline.total_frames(),
            "timeline allocated"
        );

        Ok(Self {
            config,
            groups,
            timeline,
        })
    }

    /// The allocated timeline.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// The validated configuration.
    pub fn config(&self) -> &CompositionConfig {
        &self.config
    }

    /// Groups that take part in the timeline.
    pub fn groups(&self) -> &[ContentGroup] {
        &self.groups
    }

    /// Total composition length in frames.
    pub fn total_frames(&self) -> u64 {
        self.timeline.total_frames()
    }

    #[tracing::instrument(level = "debug", skip(self))]
    /// Evaluate one frame. Frames past the end evaluate the last frame.
    pub fn eval_frame(&self, frame: FrameIndex) -> ReelResult<EvaluatedFrame> {
        let clamped = self.timeline.range().clamp(frame);
        match self.timeline.locate(clamped) {
            Some(Placement::Intro { local }) => Ok(self.eval_intro(frame, local)),
            Some(Placement::Window { window, local }) => self.eval_slide(frame, window, local),
            None => Err(ReelError::Other(anyhow::anyhow!(
                "frame {} is not covered by a timeline of {} frames",
                clamped.0,
                self.timeline.total_frames()
            ))),
        }
    }

    /// Evaluate every frame of `range` in order.
    pub fn eval_range(&self, range: FrameRange) -> ReelResult<Vec<EvaluatedFrame>> {
        (range.start.0..range.end.0)
            .map(|f| self.eval_frame(FrameIndex(f)))
            .collect()
    }

    #[tracing::instrument(skip(self))]
    /// Evaluate every frame of `range` on a dedicated rayon pool.
    ///
    /// Output order matches `eval_range`.
    pub fn eval_range_parallel(
        &self,
        range: FrameRange,
        threads: Option<usize>,
    ) -> ReelResult<Vec<EvaluatedFrame>> {
        let pool = build_thread_pool(threads)?;
        pool.install(|| {
            (range.start.0..range.end.0)
                .into_par_iter()
                .map(|f| self.eval_frame(FrameIndex(f)))
                .collect()
        })
    }

    fn eval_intro(&self, frame: FrameIndex, local: u64) -> EvaluatedFrame {
        let intro = &self.config.intro;
        let text = intro.text.clone().unwrap_or_else(|| self.config.id.clone());
        let rest = Vec2::new(
            f64::from(self.config.canvas.width) / 2.0,
            f64::from(self.config.canvas.height) / 2.0,
        );
        EvaluatedFrame {
            frame,
            segment: Segment::Intro,
            local_frame: local,
            title: Some(self.title(&intro.title, text, rest, local)),
            items: Vec::new(),
        }
    }

    fn eval_slide(
        &self,
        frame: FrameIndex,
        window: &TimelineWindow,
        local: u64,
    ) -> ReelResult<EvaluatedFrame> {
        let group = self.groups.get(window.group_index).ok_or_else(|| {
            ReelError::Other(anyhow::anyhow!(
                "window references missing group {}",
                window.group_index
            ))
        })?;
        let spec = self.config.template(&window.template)?;
        let canvas_w = f64::from(self.config.canvas.width);
        let canvas_h = f64::from(self.config.canvas.height);
        let t = local as f64;

        let placed: Vec<ItemPlacement> = match &spec.kind {
            SlideKind::Stagger(s) => s.place(&group.items, t, self.config.fps, canvas_w)?,
            SlideKind::Parallax(p) => {
                p.place(&group.items, t, window.duration_frames, canvas_w, canvas_h)?
            }
        };
        let items = placed
            .into_iter()
            .map(|p| ItemTransform {
                group_index: window.group_index,
                item_index: p.index,
                column: p.column,
                position: Vec2::new(p.x, p.y),
                scale: p.scale,
                opacity: p.opacity.clamp(0.0, 1.0),
                rotation_deg: p.rotation_deg,
            })
            .collect();

        let text = group.title.clone().unwrap_or_else(|| group.key.clone());
        let rest = Vec2::new(canvas_w / 2.0, spec.title_y);
        Ok(EvaluatedFrame {
            frame,
            segment: Segment::Slide {
                group_index: window.group_index,
                key: group.key.clone(),
                template: window.template.clone(),
            },
            local_frame: local,
            title: Some(self.title(&spec.title, text, rest, local)),
            items,
        })
    }

    fn title(&self, spec: &TitleSpec, text: String, rest: Vec2, local: u64) -> TitleTransform {
        let fps = self.config.fps;
        let t = local as f64;
        TitleTransform {
            text,
            position: rest
                + Vec2::new(spec.translate_x.sample(t, fps), spec.translate_y.sample(t, fps)),
            scale: spec.scale.sample(t, fps),
            opacity: spec.opacity.sample(t, fps).clamp(0.0, 1.0),
            rotation_deg: spec.rotation_deg.sample(t, fps),
        }
    }
}

fn build_thread_pool(threads: Option<usize>) -> ReelResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ReelError::invalid_config("'threads' must be >= 1 when set"));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ReelError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
