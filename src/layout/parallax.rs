//! Multi-column vertical scroll with per-column speed multipliers.
//!
//! Every function here is a pure function of its arguments and the local frame, so any
//! frame of a window can be laid out independently of every other frame.

use crate::animation::interpolate::lerp;
use crate::animation::motion::Sine;
use crate::composition::model::ContentItem;
use crate::foundation::error::{ReelError, ReelResult};
use crate::layout::partition::partition;

/// Card height model: taller cards for emphasized and higher-tier items.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CardHeights {
    /// Height of a plain card in pixels.
    pub base: f64,
    /// Added when the item is emphasized.
    pub emphasis_extra: f64,
    /// Added per tier level.
    pub per_tier: f64,
}

impl Default for CardHeights {
    fn default() -> Self {
        Self {
            base: 150.0,
            emphasis_extra: 0.0,
            per_tier: 0.0,
        }
    }
}

impl CardHeights {
    /// Reject non-positive base heights and negative extras.
    pub fn validate(&self) -> ReelResult<()> {
        if !(self.base.is_finite() && self.base > 0.0) {
            return Err(ReelError::invalid_config(format!(
                "card base height must be > 0, got {}",
                self.base
            )));
        }
        for (name, v) in [
            ("emphasis_extra", self.emphasis_extra),
            ("per_tier", self.per_tier),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return Err(ReelError::invalid_config(format!(
                    "card {name} must be >= 0, got {v}"
                )));
            }
        }
        Ok(())
    }

    /// Rendered height of `item`.
    pub fn height_of(&self, item: &ContentItem) -> f64 {
        let mut h = self.base;
        if item.emphasis {
            h += self.emphasis_extra;
        }
        if let Some(tier) = item.tier {
            h += self.per_tier * f64::from(tier);
        }
        h
    }
}

/// Scroll parameters for one column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollParams {
    /// Translation at progress 0 before the speed multiplier (usually the viewport height).
    pub start_y: f64,
    /// Speed multiplier applied to the whole translation.
    pub speed: f64,
    /// Vertical gap after each card.
    pub gap: f64,
    /// Extra travel past the content so the last card leaves the viewport.
    pub overscan: f64,
    /// Length of the closing fade.
    pub fade_frames: u64,
}

/// Scroll state of one column at one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnLayout {
    /// Scroll progress in `[0, 1]`.
    pub progress: f64,
    /// Content height plus overscan.
    pub travel: f64,
    /// Column translation after the speed multiplier.
    pub translation: f64,
    /// Opacity shared by every card in the column.
    pub opacity: f64,
    /// Cumulative top offset of each card inside the column.
    pub offsets: Vec<f64>,
    /// Screen y of each card's top edge.
    pub item_y: Vec<f64>,
}

/// Cumulative top offset of each card and the stacked height (every card plus its trailing gap).
pub fn stack_offsets<T>(
    column: &[T],
    gap: f64,
    item_height: impl Fn(&T) -> f64,
) -> (Vec<f64>, f64) {
    let mut offsets = Vec::with_capacity(column.len());
    let mut cursor = 0.0;
    for item in column {
        offsets.push(cursor);
        cursor += item_height(item) + gap;
    }
    (offsets, cursor)
}

/// Frame normalized over the window and clamped to `[0, 1]`.
pub fn scroll_progress(frame: f64, window_duration: u64) -> f64 {
    if window_duration == 0 {
        return 1.0;
    }
    if frame.is_nan() {
        return 0.0;
    }
    (frame / window_duration as f64).clamp(0.0, 1.0)
}

/// `lerp(start_y, -travel, progress) * speed`, with `progress` clamped.
pub fn column_translation(start_y: f64, travel: f64, progress: f64, speed: f64) -> f64 {
    let p = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };
    lerp(start_y, -travel, p) * speed
}

/// Linear fade from 1 to 0 over the last `fade_frames` of the window; exactly 0 at the window end.
///
/// Frames before the window take the opacity of frame 0.
pub fn fade_opacity(frame: f64, window_duration: u64, fade_frames: u64) -> f64 {
    let end = window_duration as f64;
    if frame.is_nan() {
        return 1.0;
    }
    if frame >= end {
        return 0.0;
    }
    let frame = frame.max(0.0);
    if fade_frames == 0 {
        return 1.0;
    }
    let fade_start = end - fade_frames as f64;
    if frame <= fade_start {
        return 1.0;
    }
    (end - frame) / fade_frames as f64
}

/// Lay out one column at `frame` (local to the window).
///
/// Cards are never culled; positions far outside the viewport are still reported.
pub fn layout<T>(
    column: &[T],
    frame: f64,
    window_duration: u64,
    params: &ScrollParams,
    item_height: impl Fn(&T) -> f64,
) -> ColumnLayout {
    let (offsets, content) = stack_offsets(column, params.gap, item_height);
    let travel = content + params.overscan;

    let progress = scroll_progress(frame, window_duration);
    let translation = column_translation(params.start_y, travel, progress, params.speed);
    let item_y = offsets.iter().map(|o| translation + o).collect();

    ColumnLayout {
        progress,
        travel,
        translation,
        opacity: fade_opacity(frame, window_duration, params.fade_frames),
        offsets,
        item_y,
    }
}

/// Horizontal centers of `count` columns of `width`, separated by `gap` and centered on the canvas.
pub fn column_centers(canvas_width: f64, count: usize, width: f64, gap: f64) -> Vec<f64> {
    let n = count as f64;
    let total = n * width + (n - 1.0).max(0.0) * gap;
    let left = (canvas_width - total) / 2.0;
    (0..count)
        .map(|c| left + c as f64 * (width + gap) + width / 2.0)
        .collect()
}

/// Parallax slide configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ParallaxSpec {
    /// Number of columns.
    pub columns: usize,
    /// Speed multiplier per column; columns past the end use 1.0.
    pub speeds: Vec<f64>,
    /// Card height model.
    pub heights: CardHeights,
    /// Vertical gap between cards.
    pub gap: f64,
    /// Extra travel past the content.
    pub overscan: f64,
    /// Closing fade length in frames.
    pub fade_frames: u64,
    /// Entry offset; defaults to the viewport height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_y: Option<f64>,
    /// Column width in pixels.
    pub column_width: f64,
    /// Horizontal gap between columns.
    pub column_gap: f64,
    /// Per-card rotation in degrees; the card's rank shifts the phase by one radian per step.
    /// `null` disables it.
    pub wobble: Option<Sine>,
}

impl Default for ParallaxSpec {
    fn default() -> Self {
        Self {
            columns: 3,
            speeds: vec![1.0, 1.2, 1.0],
            heights: CardHeights::default(),
            gap: 30.0,
            overscan: 1000.0,
            fade_frames: 30,
            start_y: None,
            column_width: 302.0,
            column_gap: 40.0,
            wobble: Sine::new(2.0, 50.0 * std::f64::consts::TAU, 0.0, 0.0).ok(),
        }
    }
}

/// Position of one card within a slide.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemPlacement {
    /// Index of the item in its group.
    pub index: usize,
    /// Column the card sits in.
    pub column: usize,
    /// Card center x.
    pub x: f64,
    /// Card top y.
    pub y: f64,
    /// Uniform scale.
    pub scale: f64,
    /// Card opacity.
    pub opacity: f64,
    /// Cosmetic rotation in degrees.
    pub rotation_deg: f64,
}

impl ParallaxSpec {
    /// Check column count, speeds and spacing.
    pub fn validate(&self) -> ReelResult<()> {
        if self.columns == 0 {
            return Err(ReelError::invalid_config("parallax column count must be >= 1"));
        }
        if let Some(s) = self.speeds.iter().find(|s| !(s.is_finite() && **s > 0.0)) {
            return Err(ReelError::invalid_config(format!(
                "parallax speed multipliers must be > 0, got {s}"
            )));
        }
        self.heights.validate()?;
        for (name, v) in [
            ("gap", self.gap),
            ("overscan", self.overscan),
            ("column_width", self.column_width),
            ("column_gap", self.column_gap),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return Err(ReelError::invalid_config(format!(
                    "parallax {name} must be >= 0, got {v}"
                )));
            }
        }
        if self.start_y.is_some_and(|y| !y.is_finite()) {
            return Err(ReelError::invalid_config("parallax start_y must be finite"));
        }
        Ok(())
    }

    /// Speed multiplier of `column`.
    pub fn speed(&self, column: usize) -> f64 {
        self.speeds.get(column).copied().unwrap_or(1.0)
    }

    /// Scroll parameters of `column` for a viewport of `viewport_height`.
    pub fn scroll_params(&self, column: usize, viewport_height: f64) -> ScrollParams {
        ScrollParams {
            start_y: self.start_y.unwrap_or(viewport_height),
            speed: self.speed(column),
            gap: self.gap,
            overscan: self.overscan,
            fade_frames: self.fade_frames,
        }
    }

    /// Place every item of a group at `frame` (local to a window of `window_duration`).
    pub fn place(
        &self,
        items: &[ContentItem],
        frame: f64,
        window_duration: u64,
        canvas_width: f64,
        viewport_height: f64,
    ) -> ReelResult<Vec<ItemPlacement>> {
        let indices: Vec<usize> = (0..items.len()).collect();
        let columns = partition(&indices, self.columns)?;
        let centers =
            column_centers(canvas_width, self.columns, self.column_width, self.column_gap);

        let mut out = Vec::with_capacity(items.len());
        for (c, column) in columns.iter().enumerate() {
            let params = self.scroll_params(c, viewport_height);
            let col = layout(column, frame, window_duration, &params, |&&i| {
                self.heights.height_of(&items[i])
            });
            for (rank, (&&index, &y)) in column.iter().zip(&col.item_y).enumerate() {
                let rotation_deg = self
                    .wobble
                    .map_or(0.0, |w| w.sample_shifted(frame, rank as f64));
                out.push(ItemPlacement {
                    index,
                    column: c,
                    x: centers[c],
                    y,
                    scale: 1.0,
                    opacity: col.opacity,
                    rotation_deg,
                });
            }
        }
        out.sort_by_key(|p| p.index);
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/parallax.rs"]
mod tests;
