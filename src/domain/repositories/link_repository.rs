//! Store contract for link persistence.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface the registry and click tracker require from the store.
///
/// The store is the only shared mutable resource of the service and the sole
/// authority on code uniqueness. Every method is a suspend point.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link with zero clicks and store-assigned id/timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CodeConflict`] if the code already exists.
    /// Returns [`AppError::Store`] on any other failure.
    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on store failures.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Returns every link, newest first (`created_at DESC, id DESC`).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on store failures.
    async fn list_all(&self) -> Result<Vec<Link>, AppError>;

    /// Hard-deletes the link with `code`.
    ///
    /// Returns `Ok(false)` when nothing matched; absence is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on store failures.
    async fn delete_by_code(&self, code: &str) -> Result<bool, AppError>;

    /// Atomically adds one click and stamps `last_clicked_at`/`updated_at`
    /// with the current time, in a single round trip.
    ///
    /// Returns `Ok(false)` when no link has `code`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on store failures.
    async fn increment_clicks(&self, code: &str) -> Result<bool, AppError>;

    /// Writes a click count computed by the caller.
    ///
    /// Target of the non-atomic fallback. The stored count becomes
    /// `max(current, total_clicks)` so it cannot move backwards, but
    /// concurrent writers may still lose increments.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on store failures.
    async fn store_click_count(
        &self,
        code: &str,
        total_clicks: i64,
        clicked_at: DateTime<Utc>,
    ) -> Result<bool, AppError>;

    /// Checks that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] if it is not.
    async fn ping(&self) -> Result<(), AppError>;
}
