//! In-process implementation of the link store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Link store held in a [`DashMap`] keyed by code.
///
/// Inserts go through the map's entry API, so a code can only be claimed
/// once. Click updates mutate the entry while holding its shard lock, which
/// makes increments atomic. Data is lost when the process exits.
#[derive(Debug)]
pub struct MemoryLinkRepository {
    links: DashMap<String, Link>,
    next_id: AtomicI64,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self {
            links: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemoryLinkRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError> {
        match self.links.entry(new_link.code.clone()) {
            Entry::Occupied(_) => Err(AppError::code_conflict(new_link.code)),
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                let link = Link::new(id, new_link.code, new_link.target_url, Utc::now());
                slot.insert(link.clone());
                Ok(link)
            }
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.links.get(code).map(|entry| entry.value().clone()))
    }

    async fn list_all(&self) -> Result<Vec<Link>, AppError> {
        let mut links: Vec<Link> = self
            .links
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        links.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(links)
    }

    async fn delete_by_code(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.links.remove(code).is_some())
    }

    async fn increment_clicks(&self, code: &str) -> Result<bool, AppError> {
        let Some(mut link) = self.links.get_mut(code) else {
            return Ok(false);
        };

        let now = Utc::now();
        link.total_clicks = link.total_clicks.saturating_add(1);
        link.last_clicked_at = Some(now);
        link.updated_at = now;

        Ok(true)
    }

    async fn store_click_count(
        &self,
        code: &str,
        total_clicks: i64,
        clicked_at: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let Some(mut link) = self.links.get_mut(code) else {
            return Ok(false);
        };

        link.total_clicks = link.total_clicks.max(total_clicks);
        link.last_clicked_at = Some(clicked_at);
        link.updated_at = Utc::now();

        Ok(true)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
