//! The result catalogue — fixed input data, never mutated by the engine.
//!
//! Each entry is a clickable "search result" with a base cost and a
//! minimum tier. A custom catalogue can be loaded from JSON; the built-in
//! set covers the demo.

use crate::{
    error::{MeterError, MeterResult},
    tier::Tier,
    types::ResultId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogueEntry {
    pub id:            ResultId,
    pub title:         String,
    pub category:      String,
    pub blurb:         String,
    /// Non-negative base price per click, before the tier price factor.
    pub base_cost:     f64,
    pub required_tier: Tier,
}

#[derive(Debug, Clone, Deserialize)]
struct CatalogueFile {
    results: Vec<CatalogueEntry>,
}

#[derive(Debug, Clone)]
pub struct Catalogue {
    entries: Vec<CatalogueEntry>,
}

impl Catalogue {
    pub fn new(entries: Vec<CatalogueEntry>) -> Self {
        Self { entries }
    }

    /// Parse a catalogue from a JSON document: `{"results": [...]}`.
    pub fn from_json(json: &str) -> MeterResult<Self> {
        let file: CatalogueFile = serde_json::from_str(json)?;
        Ok(Self::new(file.results))
    }

    /// The demo catalogue.
    pub fn builtin() -> Self {
        let entry = |id: &str, title: &str, category: &str, blurb: &str, base_cost: f64, required_tier: Tier| {
            CatalogueEntry {
                id: id.to_string(),
                title: title.to_string(),
                category: category.to_string(),
                blurb: blurb.to_string(),
                base_cost,
                required_tier,
            }
        };
        Self::new(vec![
            entry(
                "news-1",
                "Global News Network - Breaking Headlines",
                "General News",
                "Top stories from around the world.",
                0.01,
                Tier::General,
            ),
            entry(
                "social-1",
                "FriendSquare - Your Social Feed",
                "Social Media",
                "See what friends are doing (in SD at General).",
                0.05,
                Tier::Premium,
            ),
            entry(
                "shopping-1",
                "MegaMart - Daily Deals",
                "Shopping",
                "Thousands of discounts. Checkout fees apply per click.",
                0.03,
                Tier::Premium,
            ),
            entry(
                "research-1",
                "DeepScholar - Academic Archive",
                "High-Value Research",
                "Peer-reviewed journals and datasets (metered).",
                0.25,
                Tier::PremiumPlus,
            ),
            entry(
                "video-1",
                "StreamBox - Trending Videos (HD)",
                "Streaming",
                "Clips and shorts. HD locked on lower tiers.",
                0.08,
                Tier::Premium,
            ),
        ])
    }

    pub fn get(&self, id: &str) -> MeterResult<&CatalogueEntry> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| MeterError::UnknownResult { result_id: id.to_string() })
    }

    /// Case-insensitive substring match over title and category.
    /// An empty query returns the full catalogue.
    pub fn search(&self, query: &str) -> Vec<&CatalogueEntry> {
        let q = query.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|e| {
                e.title.to_lowercase().contains(&q) || e.category.to_lowercase().contains(&q)
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogueEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
