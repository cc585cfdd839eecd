use serde::{Deserialize, Serialize};

/// Active feed filters. `None` means no constraint on that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub category: Option<String>,
    pub region: Option<String>,
    pub min_score: Option<u8>,
}

/// A single filter change emitted by the filter bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterIntent {
    Category(Option<String>),
    Region(Option<String>),
    MinScore(Option<u8>),
}

impl FilterState {
    /// Apply one intent. Re-selecting the active value keeps it set; only
    /// `None` clears a dimension.
    pub fn apply(&mut self, intent: FilterIntent) {
        match intent {
            FilterIntent::Category(value) => self.category = value,
            FilterIntent::Region(value) => self.region = value,
            FilterIntent::MinScore(value) => self.min_score = value.map(|v| v.min(100)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.region.is_none() && self.min_score.is_none()
    }

    /// Short human description, e.g. `Science · Europe · ≥70`.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(category) = &self.category {
            parts.push(category.clone());
        }
        if let Some(region) = &self.region {
            parts.push(region.clone());
        }
        if let Some(score) = self.min_score {
            parts.push(format!("≥{}", score));
        }
        if parts.is_empty() {
            "All news".to_string()
        } else {
            parts.join(" · ")
        }
    }
}
