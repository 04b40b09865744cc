//! Redirect resolution and click tracking.

use std::sync::Arc;
use std::time::Duration;

use crate::application::services::{DEFAULT_STORE_TIMEOUT, with_deadline};
use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use chrono::Utc;
use serde_json::json;
use tracing::{debug, warn};

/// Result of an attempt to record a click.
///
/// Recording never fails the caller; this only tells what happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Counted through the store's atomic increment.
    Recorded,
    /// Counted through the read-modify-write fallback. May lose concurrent increments.
    RecordedFallback,
    /// No link had the code when the write ran (e.g. deleted after resolve).
    LinkMissing,
    /// Both paths failed; the click was dropped.
    Failed,
}

/// Resolves codes to targets and counts clicks.
///
/// `resolve` and `record_click` are separate calls. The redirect decision is
/// made from `resolve` alone; `record_click` absorbs every failure.
pub struct ClickService<R: LinkRepository + ?Sized> {
    repository: Arc<R>,
    store_timeout: Duration,
}

impl<R: LinkRepository + ?Sized> ClickService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    /// Sets the deadline applied to each store call.
    pub fn with_store_timeout(mut self, store_timeout: Duration) -> Self {
        self.store_timeout = store_timeout;
        self
    }

    /// Looks up the link for `code` without side effects.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    /// Returns [`AppError::Store`] on store failures.
    pub async fn resolve(&self, code: &str) -> Result<Link, AppError> {
        with_deadline(
            self.store_timeout,
            "find_by_code",
            self.repository.find_by_code(code),
        )
        .await?
        .ok_or_else(|| AppError::not_found("Link not found", json!({ "code": code })))
    }

    /// Adds one click to `code` and stamps `last_clicked_at`.
    ///
    /// Tries the store's atomic increment first. If that call fails, falls back
    /// to reading the counter and writing it back plus one, which can lose
    /// increments under concurrent clicks. Failures are logged, never returned.
    pub async fn record_click(&self, code: &str) -> ClickOutcome {
        match with_deadline(
            self.store_timeout,
            "increment_clicks",
            self.repository.increment_clicks(code),
        )
        .await
        {
            Ok(true) => {
                metrics::counter!("clicks_recorded_total", "path" => "atomic").increment(1);
                ClickOutcome::Recorded
            }
            Ok(false) => {
                debug!(code, "Click not recorded, link no longer exists");
                ClickOutcome::LinkMissing
            }
            Err(e) => {
                warn!(code, error = %e, "Atomic click increment failed, using fallback");
                self.record_click_fallback(code).await
            }
        }
    }

    async fn record_click_fallback(&self, code: &str) -> ClickOutcome {
        let link = match with_deadline(
            self.store_timeout,
            "find_by_code",
            self.repository.find_by_code(code),
        )
        .await
        {
            Ok(Some(link)) => link,
            Ok(None) => return ClickOutcome::LinkMissing,
            Err(e) => {
                warn!(code, error = %e, "Fallback click read failed, click dropped");
                metrics::counter!("click_record_failures_total").increment(1);
                return ClickOutcome::Failed;
            }
        };

        match with_deadline(
            self.store_timeout,
            "store_click_count",
            self.repository.store_click_count(
                code,
                link.total_clicks.saturating_add(1),
                Utc::now(),
            ),
        )
        .await
        {
            Ok(true) => {
                metrics::counter!("clicks_recorded_total", "path" => "fallback").increment(1);
                ClickOutcome::RecordedFallback
            }
            Ok(false) => ClickOutcome::LinkMissing,
            Err(e) => {
                warn!(code, error = %e, "Fallback click write failed, click dropped");
                metrics::counter!("click_record_failures_total").increment(1);
                ClickOutcome::Failed
            }
        }
    }
}
