use serde::{Deserialize, Serialize};

/// A category or region with its article count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetCount {
    pub name: String,
    pub count: u64,
}

/// Feed statistics shown in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "StatsWire")]
pub struct Stats {
    pub fetched_today: u64,
    pub total: Option<u64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StatsWire {
    Nested { articles: NestedStats },
    Flat { today: u64, total: Option<u64> },
}

#[derive(Deserialize)]
struct NestedStats {
    fetched_today: u64,
    #[serde(default)]
    total: Option<u64>,
}

impl From<StatsWire> for Stats {
    fn from(wire: StatsWire) -> Self {
        match wire {
            StatsWire::Nested { articles } => Stats {
                fetched_today: articles.fetched_today,
                total: articles.total,
            },
            StatsWire::Flat { today, total } => Stats {
                fetched_today: today,
                total,
            },
        }
    }
}

/// Auxiliary data for the filter bar and header. Every part is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub categories: Vec<FacetCount>,
    pub regions: Vec<FacetCount>,
    pub stats: Option<Stats>,
}
