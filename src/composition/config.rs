use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::animation::motion::Motion;
use crate::animation::spring::SpringConfig;
use crate::composition::model::ContentGroup;
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{ReelError, ReelResult};
use crate::layout::parallax::{CardHeights, ParallaxSpec};
use crate::layout::stagger::StaggerSpec;
use crate::timeline::policy::DurationPolicy;
use crate::timeline::selector::TemplateId;

/// Title placement and animation for one segment.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TitleSpec {
    /// Offset added to the resting x (canvas center).
    pub translate_x: Motion,
    /// Offset added to the resting y.
    pub translate_y: Motion,
    /// Uniform scale.
    pub scale: Motion,
    /// Opacity, clamped to `[0, 1]` when evaluated.
    pub opacity: Motion,
    /// Rotation in degrees.
    pub rotation_deg: Motion,
}

impl Default for TitleSpec {
    fn default() -> Self {
        Self {
            translate_x: Motion::Constant(0.0),
            translate_y: Motion::Constant(0.0),
            scale: Motion::Constant(1.0),
            opacity: Motion::Constant(1.0),
            rotation_deg: Motion::Constant(0.0),
        }
    }
}

/// Opening title card.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct IntroSpec {
    /// Title text; the composition id when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Title motion, resting at the canvas center.
    #[serde(flatten)]
    pub title: TitleSpec,
}

/// How a template lays out a group.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlideKind {
    /// Cards spring in one after another on a grid.
    Stagger(StaggerSpec),
    /// Columns scroll upward at different speeds.
    Parallax(ParallaxSpec),
}

impl SlideKind {
    /// Validate the inner spec.
    pub fn validate(&self) -> ReelResult<()> {
        match self {
            Self::Stagger(s) => s.validate(),
            Self::Parallax(p) => p.validate(),
        }
    }
}

/// A template: its slide kind plus the heading shown above the cards.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SlideSpec {
    /// Resting y of the heading.
    #[serde(default = "default_title_y")]
    pub title_y: f64,
    /// Heading motion over the window.
    #[serde(default)]
    pub title: TitleSpec,
    /// Card layout.
    #[serde(flatten)]
    pub kind: SlideKind,
}

impl SlideSpec {
    /// Wrap a slide kind with a static heading.
    pub fn new(kind: SlideKind) -> Self {
        Self {
            title_y: default_title_y(),
            title: TitleSpec::default(),
            kind,
        }
    }
}

fn default_title_y() -> f64 {
    120.0
}

/// Everything a composition needs besides its content.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CompositionConfig {
    /// Identifier used in logs and as the fallback intro text.
    pub id: String,
    /// Frame rate.
    pub fps: Fps,
    /// Output size.
    pub canvas: Canvas,
    /// Declared total length; must equal the allocated timeline when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_frames: Option<u64>,
    /// Intro length in frames.
    pub intro_frames: u64,
    /// Intro title card.
    pub intro: IntroSpec,
    /// Group to (template, duration) mapping.
    pub policy: DurationPolicy,
    /// Only the first `max_groups` groups are allocated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_groups: Option<usize>,
    /// Slide layout per template.
    pub templates: BTreeMap<TemplateId, SlideSpec>,
}

impl Default for CompositionConfig {
    /// Ladder video: 50-frame intro, then hero, grid or parallax matrix slides by board size.
    fn default() -> Self {
        Self {
            id: "ladder".to_owned(),
            fps: Fps::default(),
            canvas: Canvas::default(),
            duration_frames: None,
            intro_frames: 50,
            intro: IntroSpec::default(),
            policy: DurationPolicy::default(),
            max_groups: None,
            templates: default_templates(),
        }
    }
}

fn default_templates() -> BTreeMap<TemplateId, SlideSpec> {
    let hero = StaggerSpec {
        delay_frames: 10.0,
        spring: SpringConfig {
            damping: 10.0,
            mass: 0.5,
            stiffness: 200.0,
            overshoot_clamping: false,
        },
        scale_from: 3.0,
        scale_to: 1.0,
        fade_in_until: Some(0.5),
        columns: 1,
        column_width: 1000.0,
        heights: CardHeights {
            base: 300.0,
            ..Default::default()
        },
        gap: 40.0,
        top: 560.0,
        ..StaggerSpec::default()
    };
    BTreeMap::from([
        (
            TemplateId::new("hero"),
            SlideSpec {
                title_y: 420.0,
                ..SlideSpec::new(SlideKind::Stagger(hero))
            },
        ),
        (
            TemplateId::new("grid"),
            SlideSpec::new(SlideKind::Stagger(StaggerSpec::default())),
        ),
        (
            TemplateId::new("matrix"),
            SlideSpec::new(SlideKind::Parallax(ParallaxSpec::default())),
        ),
    ])
}

impl CompositionConfig {
    /// Parse a composition config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ReelResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ReelError::serde(format!("parse composition config JSON: {e}")))
    }

    /// Parse a composition config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReelError::Other(anyhow::anyhow!(
                "open composition config '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check everything the evaluator relies on.
    pub fn validate(&self) -> ReelResult<()> {
        self.fps.validate()?;
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ReelError::invalid_config(format!(
                "canvas must be non-empty, got {}x{}",
                self.canvas.width, self.canvas.height
            )));
        }
        self.policy.validate()?;
        for template in self.policy.templates() {
            if !self.templates.contains_key(template) {
                return Err(ReelError::invalid_config(format!(
                    "policy template '{template}' has no slide spec"
                )));
            }
        }
        for (id, spec) in &self.templates {
            if !spec.title_y.is_finite() {
                return Err(ReelError::invalid_config(format!(
                    "template '{id}' title_y must be finite"
                )));
            }
            spec.kind.validate().map_err(|e| match e {
                ReelError::InvalidConfig(msg) => {
                    ReelError::invalid_config(format!("template '{id}': {msg}"))
                }
                other => other,
            })?;
        }
        Ok(())
    }

    /// Groups that take part in the timeline.
    pub fn select_groups<'a>(&self, groups: &'a [ContentGroup]) -> &'a [ContentGroup] {
        match self.max_groups {
            Some(max) if max < groups.len() => &groups[..max],
            _ => groups,
        }
    }

    /// Slide spec for `template`.
    pub fn template(&self, template: &TemplateId) -> ReelResult<&SlideSpec> {
        self.templates.get(template).ok_or_else(|| {
            ReelError::invalid_config(format!("unknown template '{template}'"))
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/config.rs"]
mod tests;
