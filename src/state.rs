//! Shared application state injected into every handler.

use std::sync::Arc;
use std::time::Duration;

use crate::application::services::{ClickService, LinkService};
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::cache::CacheService;

/// Handles to the services behind the HTTP surface.
///
/// Cloned per request; everything inside is reference counted. The store
/// behind the services is the only shared mutable resource.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
    pub click_service: Arc<ClickService<dyn LinkRepository>>,
    pub cache: Arc<dyn CacheService>,
}

impl AppState {
    /// Builds the services on top of one store and one cache.
    pub fn new(
        repository: Arc<dyn LinkRepository>,
        cache: Arc<dyn CacheService>,
        store_timeout: Duration,
    ) -> Self {
        let link_service =
            LinkService::new(repository.clone()).with_store_timeout(store_timeout);
        let click_service = ClickService::new(repository).with_store_timeout(store_timeout);

        Self {
            link_service: Arc::new(link_service),
            click_service: Arc::new(click_service),
            cache,
        }
    }
}
