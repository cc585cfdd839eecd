use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::{ApiClient, ArticlePage, ArticleQuery};
use crate::app::{HopefulError, Result};
use crate::domain::{FacetCount, Stats};

pub struct HttpApiClient {
    client: Client,
    base_url: Url,
}

impl HttpApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .default_headers(headers)
            .user_agent(concat!("hopeful/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: Url::parse(base_url)?,
        })
    }

    /// Build `{base}/{segments...}` without dropping any base path.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| HopefulError::Config(format!("Unusable API URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn articles_url(&self, query: &ArticleQuery) -> Result<Url> {
        let mut url = self.endpoint(&["articles"])?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("limit", &query.page_size.to_string());
            pairs.append_pair("offset", &query.offset().to_string());
            if let Some(category) = &query.filters.category {
                pairs.append_pair("category", category);
            }
            if let Some(region) = &query.filters.region {
                pairs.append_pair("region", region);
            }
            if let Some(min_score) = query.filters.min_score {
                pairs.append_pair("min_score", &min_score.to_string());
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(HopefulError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn get_articles(&self, query: &ArticleQuery) -> Result<ArticlePage> {
        let url = self.articles_url(query)?;
        self.get_json(url).await
    }

    async fn get_categories(&self) -> Result<Vec<FacetCount>> {
        let url = self.endpoint(&["articles", "categories"])?;
        self.get_json(url).await
    }

    async fn get_regions(&self) -> Result<Vec<FacetCount>> {
        let url = self.endpoint(&["articles", "regions"])?;
        self.get_json(url).await
    }

    async fn get_stats(&self) -> Result<Stats> {
        let url = self.endpoint(&["articles", "stats"])?;
        self.get_json(url).await
    }
}
