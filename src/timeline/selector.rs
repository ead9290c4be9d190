use std::fmt;

use crate::composition::model::ContentGroup;
use crate::foundation::error::{ReelError, ReelResult};

/// Name of a slide template (`"hero"`, `"grid"`, `"matrix"`, ...).
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct TemplateId(pub String);

impl TemplateId {
    /// Wrap a template name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the template name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// One row of a [`ThresholdTable`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ThresholdBucket {
    /// Largest group count that falls in this bucket; `None` is unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_count: Option<usize>,
    /// Template used for groups in this bucket.
    pub template: TemplateId,
    /// Window length for groups in this bucket.
    pub duration_frames: u64,
}

impl ThresholdBucket {
    /// Bounded bucket covering counts up to `max_count`.
    pub fn up_to(max_count: usize, template: impl Into<String>, duration_frames: u64) -> Self {
        Self {
            max_count: Some(max_count),
            template: TemplateId::new(template),
            duration_frames,
        }
    }

    /// Final bucket covering every larger count.
    pub fn rest(template: impl Into<String>, duration_frames: u64) -> Self {
        Self {
            max_count: None,
            template: TemplateId::new(template),
            duration_frames,
        }
    }
}

/// Ordered count buckets mapping a group size to a template and window length.
///
/// A valid table is exhaustive (the last bucket is unbounded) and monotonic: bucket
/// bounds strictly increase, durations never decrease, and a template never
/// reappears once a later template has taken over.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<ThresholdBucket>", into = "Vec<ThresholdBucket>")]
pub struct ThresholdTable {
    buckets: Vec<ThresholdBucket>,
}

impl ThresholdTable {
    /// Validate and build a table.
    pub fn new(buckets: Vec<ThresholdBucket>) -> ReelResult<Self> {
        let Some(last) = buckets.last() else {
            return Err(ReelError::invalid_config("threshold table has no buckets"));
        };
        if last.max_count.is_some() {
            return Err(ReelError::invalid_config(
                "threshold table is not exhaustive: last bucket must be unbounded",
            ));
        }

        let mut prev_max: Option<usize> = None;
        for (i, b) in buckets.iter().enumerate() {
            if b.duration_frames == 0 {
                return Err(ReelError::invalid_config(format!(
                    "bucket {i} ('{}') has zero duration",
                    b.template
                )));
            }
            if i + 1 < buckets.len() {
                let Some(max) = b.max_count else {
                    return Err(ReelError::invalid_config(format!(
                        "only the last bucket may be unbounded (bucket {i})"
                    )));
                };
                if prev_max.is_some_and(|p| max <= p) {
                    return Err(ReelError::invalid_config(format!(
                        "bucket bounds must strictly increase (bucket {i} max {max})"
                    )));
                }
                prev_max = Some(max);
            }
        }

        for (i, w) in buckets.windows(2).enumerate() {
            if w[1].duration_frames < w[0].duration_frames {
                return Err(ReelError::invalid_config(format!(
                    "bucket {} is shorter than bucket {i}: larger groups must not get shorter windows",
                    i + 1
                )));
            }
            if w[1].template != w[0].template
                && buckets[..=i].iter().any(|b| b.template == w[1].template)
            {
                return Err(ReelError::invalid_config(format!(
                    "template '{}' reappears after a larger template",
                    w[1].template
                )));
            }
        }

        Ok(Self { buckets })
    }

    /// Buckets in ascending count order.
    pub fn buckets(&self) -> &[ThresholdBucket] {
        &self.buckets
    }

    /// Bucket that covers `count`.
    pub fn bucket_for(&self, count: usize) -> &ThresholdBucket {
        let idx = self
            .buckets
            .iter()
            .position(|b| b.max_count.is_none_or(|m| count <= m))
            .unwrap_or(self.buckets.len() - 1);
        &self.buckets[idx]
    }

    /// Template for a group of `count` items.
    pub fn select(&self, count: usize) -> &TemplateId {
        &self.bucket_for(count).template
    }
}

impl Default for ThresholdTable {
    /// Hero for up to 4 items (3 s), grid up to 20 (5 s), parallax matrix beyond (15 s).
    fn default() -> Self {
        Self {
            buckets: vec![
                ThresholdBucket::up_to(4, "hero", 90),
                ThresholdBucket::up_to(20, "grid", 150),
                ThresholdBucket::rest("matrix", 450),
            ],
        }
    }
}

impl TryFrom<Vec<ThresholdBucket>> for ThresholdTable {
    type Error = ReelError;

    fn try_from(buckets: Vec<ThresholdBucket>) -> Result<Self, Self::Error> {
        Self::new(buckets)
    }
}

impl From<ThresholdTable> for Vec<ThresholdBucket> {
    fn from(t: ThresholdTable) -> Self {
        t.buckets
    }
}

/// Template for `group`, chosen by its declared count.
pub fn select_template<'a>(group: &ContentGroup, table: &'a ThresholdTable) -> &'a TemplateId {
    table.select(group.count())
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/selector.rs"]
mod tests;
