use crate::composition::model::ContentGroup;
use crate::foundation::error::{ReelError, ReelResult};
use crate::timeline::selector::{TemplateId, ThresholdTable};

/// Template and window length chosen for one group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlideChoice {
    /// Template that renders the group.
    pub template: TemplateId,
    /// Window length in frames.
    pub duration_frames: u64,
}

/// Total, deterministic mapping from a group to `(duration, template)`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DurationPolicy {
    /// Pick by group count through ordered buckets.
    Threshold {
        /// Count buckets.
        buckets: ThresholdTable,
    },
    /// Same template and length for every group.
    Fixed {
        /// Template for every group.
        template: TemplateId,
        /// Window length for every group.
        duration_frames: u64,
    },
}

impl Default for DurationPolicy {
    fn default() -> Self {
        Self::Threshold {
            buckets: ThresholdTable::default(),
        }
    }
}

impl DurationPolicy {
    /// Check invariants that the constructors cannot enforce.
    pub fn validate(&self) -> ReelResult<()> {
        match self {
            Self::Threshold { .. } => Ok(()),
            Self::Fixed {
                template,
                duration_frames,
            } => {
                if *duration_frames == 0 {
                    return Err(ReelError::invalid_config(format!(
                        "fixed policy for template '{template}' has zero duration"
                    )));
                }
                Ok(())
            }
        }
    }

    /// Resolve the template and window length for `group`.
    pub fn resolve(&self, group: &ContentGroup) -> SlideChoice {
        match self {
            Self::Threshold { buckets } => {
                let b = buckets.bucket_for(group.count());
                SlideChoice {
                    template: b.template.clone(),
                    duration_frames: b.duration_frames,
                }
            }
            Self::Fixed {
                template,
                duration_frames,
            } => SlideChoice {
                template: template.clone(),
                duration_frames: *duration_frames,
            },
        }
    }

    /// Every template this policy can produce.
    pub fn templates(&self) -> Vec<&TemplateId> {
        match self {
            Self::Threshold { buckets } => {
                let mut out: Vec<&TemplateId> = Vec::new();
                for b in buckets.buckets() {
                    if !out.contains(&&b.template) {
                        out.push(&b.template);
                    }
                }
                out
            }
            Self::Fixed { template, .. } => vec![template],
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/policy.rs"]
mod tests;
