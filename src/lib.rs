//! slidereel turns ordered content groups into frame-accurate slide timelines for vertical videos.
//!
//! A composition is an intro followed by one window per content group. Each group is routed
//! to a slide template by its size; the template lays its items out either as a staggered,
//! spring-driven grid or as parallax columns scrolling at different speeds.
//!
//! # Pipeline overview
//!
//! 1. **Load**: [`CompositionConfig`] and [`ContentDocument`] from JSON.
//! 2. **Allocate**: [`allocate`] maps groups through a [`DurationPolicy`] into a contiguous
//!    [`Timeline`] of [`TimelineWindow`]s.
//! 3. **Evaluate**: [`Evaluator::eval_frame`] resolves every card's position, scale, opacity and
//!    rotation for one frame, ready for an external compositor.
//!
//! Every stage after loading is a pure function of its inputs and the frame number. Frames
//! can be evaluated in any order, repeatedly, or in parallel ([`Evaluator::eval_range_parallel`]).
//!
//! The building blocks are public on their own: [`interpolate`] and [`spring`] for scalar
//! animation, [`partition`] for round-robin columns and [`layout()`] for a single scrolling column.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod composition;
mod eval;
mod foundation;
mod layout;
mod timeline;

pub use animation::ease::Ease;
pub use animation::interpolate::{Extrapolate, InterpolateOptions, Interpolator, interpolate, lerp};
pub use animation::motion::{Motion, Sine};
pub use animation::spring::{
    DEFAULT_SETTLE_THRESHOLD, SpringConfig, SpringMotion, measure_spring, spring,
};
pub use composition::config::{CompositionConfig, IntroSpec, SlideKind, SlideSpec, TitleSpec};
pub use composition::model::{ContentDocument, ContentGroup, ContentItem, ItemValue};
pub use eval::evaluator::{EvaluatedFrame, Evaluator, ItemTransform, Segment, TitleTransform};
pub use foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Vec2};
pub use foundation::error::{ReelError, ReelResult};
pub use layout::parallax::{
    CardHeights, ColumnLayout, ItemPlacement, ParallaxSpec, ScrollParams, column_centers,
    column_translation, fade_opacity, layout, scroll_progress, stack_offsets,
};
pub use layout::partition::{ColumnAssignment, partition};
pub use layout::stagger::StaggerSpec;
pub use timeline::allocator::{Placement, Timeline, TimelineWindow, allocate};
pub use timeline::policy::{DurationPolicy, SlideChoice};
pub use timeline::selector::{TemplateId, ThresholdBucket, ThresholdTable, select_template};
