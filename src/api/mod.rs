pub mod http_client;
#[cfg(test)]
pub mod mock;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::app::Result;
use crate::domain::{Article, Catalog, FacetCount, FilterState, Stats};

pub use http_client::HttpApiClient;

pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Parameters for one page of the article feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleQuery {
    pub filters: FilterState,
    /// 1-based page cursor.
    pub page: u32,
    pub page_size: usize,
}

impl ArticleQuery {
    pub fn offset(&self) -> usize {
        (self.page.max(1) as usize - 1) * self.page_size
    }
}

/// One page of articles as returned by the backend.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticlePage {
    pub articles: Vec<Article>,
    pub total: u64,
    /// The backend's own flag. Only used for diagnostics.
    #[serde(default)]
    pub has_more: Option<bool>,
}

#[async_trait]
pub trait ApiClient {
    async fn get_articles(&self, query: &ArticleQuery) -> Result<ArticlePage>;
    async fn get_categories(&self) -> Result<Vec<FacetCount>>;
    async fn get_regions(&self) -> Result<Vec<FacetCount>>;
    async fn get_stats(&self) -> Result<Stats>;
}

/// Load categories, regions and stats concurrently.
///
/// Failures never propagate: a missing part degrades the filter bar or
/// the today counter but never blocks the feed.
pub async fn load_catalog(api: &(dyn ApiClient + Send + Sync)) -> Catalog {
    let (categories, regions, stats) =
        futures::join!(api.get_categories(), api.get_regions(), api.get_stats());

    let categories = categories.unwrap_or_else(|e| {
        warn!("Failed to load categories: {}", e);
        Vec::new()
    });
    let regions = regions.unwrap_or_else(|e| {
        warn!("Failed to load regions: {}", e);
        Vec::new()
    });
    let stats = match stats {
        Ok(stats) => Some(stats),
        Err(e) => {
            warn!("Failed to load stats: {}", e);
            None
        }
    };

    Catalog {
        categories,
        regions,
        stats,
    }
}
