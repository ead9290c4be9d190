use crate::animation::interpolate::{InterpolateOptions, interpolate, lerp};
use crate::animation::spring::{SpringConfig, SpringMotion};
use crate::composition::model::ContentItem;
use crate::foundation::core::Fps;
use crate::foundation::error::{ReelError, ReelResult};
use crate::layout::parallax::{CardHeights, ItemPlacement, column_centers, stack_offsets};
use crate::layout::partition::{ColumnAssignment, partition};

/// Grid of cards that spring in one after another.
///
/// Item `i` starts `lead_in_frames + i * delay_frames` into the window. Its progress `p`
/// (a spring, or a linear ramp when `ramp_frames` is set) drives
/// `scale = lerp(scale_from, scale_to, p)`, a slide of `(offset_x, offset_y) * (1 - p)` and,
/// when `fade_in_until` is set, `opacity = clamp(p / fade_in_until, 0, 1)`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StaggerSpec {
    /// Delay before the first item.
    pub lead_in_frames: f64,
    /// Delay between consecutive items.
    pub delay_frames: f64,
    /// Entrance spring.
    pub spring: SpringConfig,
    /// Linear entrance over this many frames in place of the spring.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ramp_frames: Option<f64>,
    /// Scale at progress 0.
    pub scale_from: f64,
    /// Scale at progress 1.
    pub scale_to: f64,
    /// Progress at which the card is fully opaque; `None` keeps it opaque throughout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fade_in_until: Option<f64>,
    /// Horizontal offset at progress 0.
    pub offset_x: f64,
    /// Vertical offset at progress 0.
    pub offset_y: f64,
    /// Grid columns.
    pub columns: usize,
    /// Column width in pixels.
    pub column_width: f64,
    /// Horizontal gap between columns.
    pub column_gap: f64,
    /// Card height model.
    pub heights: CardHeights,
    /// Vertical gap between rows.
    pub gap: f64,
    /// y of the first row.
    pub top: f64,
    /// Repeat items cyclically until at least this many cards are shown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pad_to: Option<usize>,
}

impl Default for StaggerSpec {
    /// Two-column grid popping in every 5 frames.
    fn default() -> Self {
        Self {
            lead_in_frames: 0.0,
            delay_frames: 5.0,
            spring: SpringConfig {
                damping: 12.0,
                ..SpringConfig::default()
            },
            ramp_frames: None,
            scale_from: 0.0,
            scale_to: 1.0,
            fade_in_until: None,
            offset_x: 0.0,
            offset_y: 0.0,
            columns: 2,
            column_width: 485.0,
            column_gap: 30.0,
            heights: CardHeights {
                base: 130.0,
                ..CardHeights::default()
            },
            gap: 30.0,
            top: 240.0,
            pad_to: None,
        }
    }
}

impl StaggerSpec {
    /// Check the spring, the grid and the mapping ranges.
    pub fn validate(&self) -> ReelResult<()> {
        self.spring.validate()?;
        self.heights.validate()?;
        if self.columns == 0 {
            return Err(ReelError::invalid_config("stagger column count must be >= 1"));
        }
        for (name, v) in [
            ("lead_in_frames", self.lead_in_frames),
            ("delay_frames", self.delay_frames),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return Err(ReelError::invalid_config(format!(
                    "stagger {name} must be >= 0 frames, got {v}"
                )));
            }
        }
        if self.ramp_frames.is_some_and(|r| !(r.is_finite() && r > 0.0)) {
            return Err(ReelError::invalid_config("stagger ramp_frames must be > 0"));
        }
        if self.fade_in_until.is_some_and(|u| !(u.is_finite() && u > 0.0)) {
            return Err(ReelError::invalid_config("stagger fade_in_until must be > 0"));
        }
        if self.pad_to == Some(0) {
            return Err(ReelError::invalid_config("stagger pad_to must be >= 1"));
        }
        for (name, v) in [
            ("scale_from", self.scale_from),
            ("scale_to", self.scale_to),
            ("offset_x", self.offset_x),
            ("offset_y", self.offset_y),
            ("top", self.top),
        ] {
            if !v.is_finite() {
                return Err(ReelError::invalid_config(format!(
                    "stagger {name} must be finite"
                )));
            }
        }
        for (name, v) in [
            ("column_width", self.column_width),
            ("column_gap", self.column_gap),
            ("gap", self.gap),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return Err(ReelError::invalid_config(format!(
                    "stagger {name} must be >= 0, got {v}"
                )));
            }
        }
        Ok(())
    }

    /// Item indices shown on the slide, after cyclic padding.
    pub fn slots(&self, item_count: usize) -> Vec<usize> {
        let shown = match self.pad_to {
            Some(min) if item_count > 0 => item_count.max(min),
            _ => item_count,
        };
        (0..shown).map(|slot| slot % item_count.max(1)).collect()
    }

    /// Entrance progress of slot `slot` at `frame`.
    pub fn progress(&self, slot: usize, frame: f64, fps: Fps) -> ReelResult<f64> {
        let start = self.lead_in_frames + slot as f64 * self.delay_frames;
        if let Some(ramp) = self.ramp_frames {
            return interpolate(
                frame,
                &[start, start + ramp],
                &[0.0, 1.0],
                InterpolateOptions::clamp(),
            );
        }
        let motion = SpringMotion::new(0.0, 1.0, self.spring)?.with_delay(start)?;
        Ok(motion.sample(frame, fps))
    }

    /// Place every card at `frame` (local to the window).
    pub fn place(
        &self,
        items: &[ContentItem],
        frame: f64,
        fps: Fps,
        canvas_width: f64,
    ) -> ReelResult<Vec<ItemPlacement>> {
        let slots = self.slots(items.len());
        let centers =
            column_centers(canvas_width, self.columns, self.column_width, self.column_gap);

        let row_offsets: Vec<Vec<f64>> = partition(&slots, self.columns)?
            .iter()
            .map(|column| {
                stack_offsets(column, self.gap, |&&i| self.heights.height_of(&items[i])).0
            })
            .collect();

        let mut out = Vec::with_capacity(slots.len());
        for (slot, &index) in slots.iter().enumerate() {
            let cell = ColumnAssignment::for_index(slot, self.columns)?;
            let p = self.progress(slot, frame, fps)?;
            let opacity = self
                .fade_in_until
                .map_or(1.0, |until| (p / until).clamp(0.0, 1.0));
            out.push(ItemPlacement {
                index,
                column: cell.column,
                x: centers[cell.column] + self.offset_x * (1.0 - p),
                y: self.top + row_offsets[cell.column][cell.rank] + self.offset_y * (1.0 - p),
                scale: lerp(self.scale_from, self.scale_to, p),
                opacity,
                rotation_deg: 0.0,
            });
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/stagger.rs"]
mod tests;
