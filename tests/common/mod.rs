#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use link_shortener::domain::entities::{Link, NewLink};
use link_shortener::domain::repositories::LinkRepository;
use link_shortener::error::AppError;
use link_shortener::infrastructure::cache::{CacheResult, CacheService, NullCache};
use link_shortener::infrastructure::persistence::MemoryLinkRepository;
use link_shortener::routes::router;
use link_shortener::state::AppState;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub const TEST_STORE_TIMEOUT: Duration = Duration::from_secs(5);

pub fn create_test_state() -> (AppState, Arc<MemoryLinkRepository>) {
    let repository = Arc::new(MemoryLinkRepository::new());
    let state = state_with_repository(repository.clone());

    (state, repository)
}

pub fn state_with_repository(repository: Arc<dyn LinkRepository>) -> AppState {
    AppState::new(repository, Arc::new(NullCache::new()), TEST_STORE_TIMEOUT)
}

/// State backed by the memory store and a [`MemoryCache`].
pub fn create_cached_test_state() -> (AppState, Arc<MemoryLinkRepository>, Arc<MemoryCache>) {
    let repository = Arc::new(MemoryLinkRepository::new());
    let cache = Arc::new(MemoryCache::default());
    let state = AppState::new(repository.clone(), cache.clone(), TEST_STORE_TIMEOUT);

    (state, repository, cache)
}

pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(router(state)).unwrap()
}

pub async fn create_test_link(repository: &MemoryLinkRepository, code: &str, url: &str) -> Link {
    repository
        .insert(NewLink {
            code: code.to_string(),
            target_url: url.to_string(),
        })
        .await
        .unwrap()
}

/// Which click-recording calls [`FlakyClickRepository`] fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickFailure {
    /// The atomic increment fails; the fallback path still works.
    Atomic,
    /// Both the atomic increment and the fallback write fail.
    All,
}

/// Memory store whose click-recording calls fail on demand.
pub struct FlakyClickRepository {
    pub inner: Arc<MemoryLinkRepository>,
    failure: ClickFailure,
    pub failed_calls: AtomicUsize,
}

impl FlakyClickRepository {
    pub fn new(inner: Arc<MemoryLinkRepository>, failure: ClickFailure) -> Self {
        Self {
            inner,
            failure,
            failed_calls: AtomicUsize::new(0),
        }
    }

    fn fail(&self, operation: &str) -> AppError {
        self.failed_calls.fetch_add(1, Ordering::SeqCst);
        AppError::store(format!("{} unavailable", operation))
    }
}

#[async_trait]
impl LinkRepository for FlakyClickRepository {
    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError> {
        self.inner.insert(new_link).await
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        self.inner.find_by_code(code).await
    }

    async fn list_all(&self) -> Result<Vec<Link>, AppError> {
        self.inner.list_all().await
    }

    async fn delete_by_code(&self, code: &str) -> Result<bool, AppError> {
        self.inner.delete_by_code(code).await
    }

    async fn increment_clicks(&self, _code: &str) -> Result<bool, AppError> {
        Err(self.fail("increment_clicks"))
    }

    async fn store_click_count(
        &self,
        code: &str,
        total_clicks: i64,
        clicked_at: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        match self.failure {
            ClickFailure::Atomic => {
                self.inner
                    .store_click_count(code, total_clicks, clicked_at)
                    .await
            }
            ClickFailure::All => Err(self.fail("store_click_count")),
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.inner.ping().await
    }
}

/// Store whose calls never complete, for exercising store deadlines.
pub struct StalledRepository;

#[async_trait]
impl LinkRepository for StalledRepository {
    async fn insert(&self, _new_link: NewLink) -> Result<Link, AppError> {
        std::future::pending().await
    }

    async fn find_by_code(&self, _code: &str) -> Result<Option<Link>, AppError> {
        std::future::pending().await
    }

    async fn list_all(&self) -> Result<Vec<Link>, AppError> {
        std::future::pending().await
    }

    async fn delete_by_code(&self, _code: &str) -> Result<bool, AppError> {
        std::future::pending().await
    }

    async fn increment_clicks(&self, _code: &str) -> Result<bool, AppError> {
        std::future::pending().await
    }

    async fn store_click_count(
        &self,
        _code: &str,
        _total_clicks: i64,
        _clicked_at: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        std::future::pending().await
    }

    async fn ping(&self) -> Result<(), AppError> {
        std::future::pending().await
    }
}

/// Redirect cache held in a map, counting hits.
#[derive(Default)]
pub struct MemoryCache {
    entries: DashMap<String, String>,
    pub hits: AtomicUsize,
}

impl MemoryCache {
    pub fn cached(&self, code: &str) -> Option<String> {
        self.entries.get(code).map(|entry| entry.value().clone())
    }

    pub fn put(&self, code: &str, target_url: &str) {
        self.entries.insert(code.to_string(), target_url.to_string());
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get_target(&self, code: &str) -> CacheResult<Option<String>> {
        let hit = self.cached(code);
        if hit.is_some() {
            self.hits.fetch_add(1, Ordering::SeqCst);
        }
        Ok(hit)
    }

    async fn set_target(
        &self,
        code: &str,
        target_url: &str,
        _ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        self.put(code, target_url);
        Ok(())
    }

    async fn invalidate(&self, code: &str) -> CacheResult<()> {
        self.entries.remove(code);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

/// Cache whose fill lands together with a delete of the same code, as when
/// a delete request runs between a redirect's lookup and its cache write.
pub struct DeleteDuringFillCache {
    pub inner: MemoryCache,
    pub repository: Arc<MemoryLinkRepository>,
}

#[async_trait]
impl CacheService for DeleteDuringFillCache {
    async fn get_target(&self, code: &str) -> CacheResult<Option<String>> {
        self.inner.get_target(code).await
    }

    async fn set_target(
        &self,
        code: &str,
        target_url: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        self.inner.set_target(code, target_url, ttl_seconds).await?;
        self.repository.delete_by_code(code).await.unwrap();
        Ok(())
    }

    async fn invalidate(&self, code: &str) -> CacheResult<()> {
        self.inner.invalidate(code).await
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
