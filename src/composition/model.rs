use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{ReelError, ReelResult};

/// Display value attached to an item (a price change, a timestamp, a score).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ItemValue {
    /// Numeric value.
    Number(f64),
    /// Pre-formatted text.
    Text(String),
}

/// One displayable entry: a stock, a news headline, a ranking row.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ContentItem {
    /// Primary text.
    #[serde(alias = "title")]
    pub name: String,
    /// Category label shown next to the name.
    #[serde(default, alias = "theme", alias = "industry", alias = "tag_full")]
    pub label: String,
    /// Optional value column.
    #[serde(default, alias = "change", alias = "time")]
    pub value: Option<ItemValue>,
    /// Highlighted entries get taller cards and accent styling.
    #[serde(default, alias = "is_yizi")]
    pub emphasis: bool,
    /// Optional level; higher tiers render larger.
    #[serde(default, alias = "level")]
    pub tier: Option<u32>,
}

impl ContentItem {
    /// Plain item with a name and label.
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            value: None,
            emphasis: false,
            tier: None,
        }
    }

    /// Mark the item as emphasized.
    pub fn emphasized(mut self) -> Self {
        self.emphasis = true;
        self
    }

    /// Attach a tier.
    pub fn with_tier(mut self, tier: u32) -> Self {
        self.tier = Some(tier);
        self
    }
}

/// Ordered items sharing a grouping key (a board level, a ranking section).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ContentGroup {
    /// Grouping key.
    #[serde(alias = "board")]
    pub key: String,
    /// Optional heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    count: Option<usize>,
    /// Items in display order.
    #[serde(alias = "stocks")]
    pub items: Vec<ContentItem>,
}

impl ContentGroup {
    /// Group whose count is its item count.
    pub fn new(key: impl Into<String>, items: Vec<ContentItem>) -> Self {
        Self {
            key: key.into(),
            title: None,
            count: None,
            items,
        }
    }

    /// Attach a heading.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Override the declared count.
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    /// Declared size of the group, falling back to the number of items.
    pub fn count(&self) -> usize {
        self.count.unwrap_or(self.items.len())
    }
}

/// The content consumed by one render pass.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct ContentDocument {
    /// Groups in display order.
    pub groups: Vec<ContentGroup>,
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum DocumentRepr {
    Groups(Vec<ContentGroup>),
    Sections {
        sections: Vec<ContentGroup>,
    },
    Digest {
        #[serde(default)]
        date: Option<String>,
        items: Vec<ContentItem>,
    },
    Summary(SummaryRepr),
}

#[derive(serde::Deserialize)]
struct SummaryRepr {
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    market_mode: Option<String>,
    summary_bullets: Vec<String>,
    #[serde(default)]
    strategy: Option<String>,
    #[serde(default)]
    hot_sectors: Vec<SectorRepr>,
    #[serde(default)]
    sentiment_score: Option<f64>,
}

#[derive(serde::Deserialize)]
struct SectorRepr {
    name: String,
    #[serde(default)]
    change: Option<ItemValue>,
    #[serde(default, rename = "type")]
    direction: Option<String>,
}

impl From<SectorRepr> for ContentItem {
    fn from(s: SectorRepr) -> Self {
        let direction = s.direction.unwrap_or_default();
        Self {
            emphasis: direction == "up",
            value: s.change,
            ..ContentItem::new(s.name, direction)
        }
    }
}

impl SummaryRepr {
    /// One group per card: headline, narrative, strategy, sectors, sentiment.
    fn into_groups(self) -> Vec<ContentGroup> {
        let mut groups = Vec::new();
        if self.date.is_some() || self.market_mode.is_some() {
            let mode = self.market_mode.unwrap_or_default();
            let headline =
                ContentGroup::new("headline", vec![ContentItem::new(mode, "market mode")]);
            groups.push(match self.date {
                Some(date) => headline.with_title(date),
                None => headline,
            });
        }
        let bullets = self
            .summary_bullets
            .into_iter()
            .map(|b| ContentItem::new(b, ""))
            .collect();
        groups.push(ContentGroup::new("narrative", bullets).with_title("Core Narrative"));
        if let Some(strategy) = self.strategy {
            groups.push(
                ContentGroup::new("strategy", vec![ContentItem::new(strategy, "")])
                    .with_title("Strategy Focus"),
            );
        }
        if !self.hot_sectors.is_empty() {
            let sectors = self.hot_sectors.into_iter().map(ContentItem::from).collect();
            groups.push(ContentGroup::new("sectors", sectors).with_title("Sector Heatmap"));
        }
        if let Some(score) = self.sentiment_score {
            let item = ContentItem {
                value: Some(ItemValue::Number(score)),
                ..ContentItem::new("sentiment", "/ 100")
            };
            groups.push(ContentGroup::new("sentiment", vec![item]).with_title("Sentiment Score"));
        }
        groups
    }
}

impl<'de> serde::Deserialize<'de> for ContentDocument {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let groups = match DocumentRepr::deserialize(deserializer)? {
            DocumentRepr::Groups(groups) => groups,
            DocumentRepr::Sections { sections } => sections,
            DocumentRepr::Digest { date, items } => vec![ContentGroup::new(
                date.unwrap_or_else(|| "items".to_owned()),
                items,
            )],
            DocumentRepr::Summary(summary) => summary.into_groups(),
        };
        Ok(Self { groups })
    }
}

impl ContentDocument {
    /// Parse a content document from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ReelResult<Self> {
        let doc: Self = serde_json::from_reader(r)
            .map_err(|e| ReelError::serde(format!("parse content JSON: {e}")))?;
        for g in &doc.groups {
            if g.count() != g.items.len() {
                tracing::warn!(
                    key = %g.key,
                    declared = g.count(),
                    items = g.items.len(),
                    "group count differs from item count"
                );
            }
        }
        Ok(doc)
    }

    /// Parse a content document from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReelError::Other(anyhow::anyhow!(
                "open content JSON '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
