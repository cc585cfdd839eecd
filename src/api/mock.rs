//! Scripted `ApiClient` for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{ApiClient, ArticlePage, ArticleQuery};
use crate::app::{HopefulError, Result};
use crate::domain::{Article, FacetCount, Stats};

enum Scripted {
    Page(ArticlePage),
    Fail(String),
}

#[derive(Default)]
pub struct MockApi {
    pages: Mutex<VecDeque<Scripted>>,
    queries: Mutex<Vec<ArticleQuery>>,
    categories: Mutex<Option<Vec<FacetCount>>>,
    regions: Mutex<Option<Vec<FacetCount>>>,
    stats_fail: Mutex<bool>,
}

impl MockApi {
    pub fn new() -> Self {
        let api = Self::default();
        *api.categories.lock().unwrap() = Some(Vec::new());
        *api.regions.lock().unwrap() = Some(Vec::new());
        api
    }

    pub fn article(id: i64) -> Article {
        Article::new(
            id,
            &format!("Story {}", id),
            &format!("https://news.example/{}", id),
            "Example",
        )
    }

    pub fn page(ids: &[i64], total: u64) -> ArticlePage {
        ArticlePage {
            articles: ids.iter().map(|&id| Self::article(id)).collect(),
            total,
            has_more: None,
        }
    }

    pub fn push_page(&self, page: ArticlePage) {
        self.pages.lock().unwrap().push_back(Scripted::Page(page));
    }

    pub fn push_failure(&self, message: &str) {
        self.pages
            .lock()
            .unwrap()
            .push_back(Scripted::Fail(message.to_string()));
    }

    pub fn set_categories(&self, categories: Vec<FacetCount>) {
        *self.categories.lock().unwrap() = Some(categories);
    }

    pub fn set_regions(&self, regions: Vec<FacetCount>) {
        *self.regions.lock().unwrap() = Some(regions);
    }

    pub fn fail_categories(&self) {
        *self.categories.lock().unwrap() = None;
    }

    pub fn fail_stats(&self) {
        *self.stats_fail.lock().unwrap() = true;
    }

    /// Every article query issued so far, in order.
    pub fn queries(&self) -> Vec<ArticleQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl ApiClient for MockApi {
    async fn get_articles(&self, query: &ArticleQuery) -> Result<ArticlePage> {
        self.queries.lock().unwrap().push(query.clone());
        match self.pages.lock().unwrap().pop_front() {
            Some(Scripted::Page(page)) => Ok(page),
            Some(Scripted::Fail(message)) => Err(HopefulError::Other(message)),
            None => Ok(ArticlePage::default()),
        }
    }

    async fn get_categories(&self) -> Result<Vec<FacetCount>> {
        self.categories
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| HopefulError::Other("categories unavailable".into()))
    }

    async fn get_regions(&self) -> Result<Vec<FacetCount>> {
        self.regions
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| HopefulError::Other("regions unavailable".into()))
    }

    async fn get_stats(&self) -> Result<Stats> {
        if *self.stats_fail.lock().unwrap() {
            return Err(HopefulError::Other("stats unavailable".into()));
        }
        Ok(Stats {
            fetched_today: 0,
            total: None,
        })
    }
}
