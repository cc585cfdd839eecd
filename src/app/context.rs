use std::sync::Arc;

use crate::api::{ApiClient, HttpApiClient};
use crate::app::error::Result;
use crate::config::ApiConfig;
use crate::store::{FileStore, MemoryStore, PreferenceStore, Preferences};

pub struct AppContext {
    pub api: Arc<dyn ApiClient + Send + Sync>,
    pub prefs: Arc<dyn PreferenceStore + Send + Sync>,
}

impl AppContext {
    pub fn new(api_config: &ApiConfig) -> Result<Self> {
        let api: Arc<dyn ApiClient + Send + Sync> = Arc::new(HttpApiClient::new(
            &api_config.base_url,
            api_config.timeout(),
        )?);
        let prefs: Arc<dyn PreferenceStore + Send + Sync> =
            Arc::new(FileStore::new(FileStore::default_path()?));

        Ok(Self { api, prefs })
    }

    /// Context with the given client and preferences kept in memory.
    pub fn in_memory(api: Arc<dyn ApiClient + Send + Sync>) -> Self {
        Self {
            api,
            prefs: Arc::new(MemoryStore::new(Preferences::default())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use crate::feed::FeedController;

    #[tokio::test]
    async fn test_in_memory_context() {
        let api = Arc::new(MockApi::new());
        api.push_page(MockApi::page(&[1, 2], 2));
        let ctx = AppContext::in_memory(api.clone());

        assert!(ctx.prefs.load().unwrap().dark_mode);
        ctx.prefs.save(&Preferences { dark_mode: false }).unwrap();
        assert!(!ctx.prefs.load().unwrap().dark_mode);

        let mut controller = FeedController::new(20);
        controller.fetch_articles(ctx.api.as_ref(), true).await;
        assert_eq!(controller.state().articles.len(), 2);
        assert_eq!(api.queries().len(), 1);
    }
}
