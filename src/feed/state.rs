use std::collections::HashSet;

use crate::domain::{Article, ArticleId};

/// Observable feed state. Mutated only through `FeedController`.
///
/// `has_more` starts false; only a successful fetch can turn it on.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedState {
    pub articles: Vec<Article>,
    pub page: u32,
    pub has_more: bool,
    pub total: u64,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            articles: Vec::new(),
            page: 1,
            has_more: false,
            total: 0,
            loading: false,
            error: None,
        }
    }
}

impl FeedState {
    /// Append articles whose id has not been seen yet, keeping arrival order.
    /// Returns how many were added.
    pub(crate) fn append_unique(&mut self, incoming: Vec<Article>) -> usize {
        let mut seen: HashSet<ArticleId> = self.articles.iter().map(|a| a.id).collect();
        let before = self.articles.len();
        for article in incoming {
            if seen.insert(article.id) {
                self.articles.push(article);
            }
        }
        self.articles.len() - before
    }

    pub fn is_empty_result(&self) -> bool {
        self.articles.is_empty() && !self.loading && self.error.is_none()
    }
}
