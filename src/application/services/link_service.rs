//! Link registry: creation, lookup, listing and deletion of short links.

use std::sync::Arc;
use std::time::Duration;

use crate::application::services::{DEFAULT_STORE_TIMEOUT, with_deadline};
use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, RandomCodeGenerator, is_valid_code};
use crate::utils::url_validator::validate_target_url;
use serde_json::json;
use tracing::{debug, info};

/// Number of generated candidates tried before giving up.
pub const MAX_GENERATION_ATTEMPTS: usize = 10;

/// Service orchestrating link lifecycle operations against the store.
///
/// Validation happens here, before any store call. Code uniqueness is
/// ultimately enforced by the store: the existence check made while
/// generating a code only reduces the chance of a failed insert.
pub struct LinkService<R: LinkRepository + ?Sized> {
    repository: Arc<R>,
    generator: Arc<dyn CodeGenerator>,
    store_timeout: Duration,
}

impl<R: LinkRepository + ?Sized> LinkService<R> {
    /// Creates a registry using random codes and the default store deadline.
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            generator: Arc::new(RandomCodeGenerator),
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    /// Replaces the code generator.
    pub fn with_generator(mut self, generator: Arc<dyn CodeGenerator>) -> Self {
        self.generator = generator;
        self
    }

    /// Sets the deadline applied to each store call.
    pub fn with_store_timeout(mut self, store_timeout: Duration) -> Self {
        self.store_timeout = store_timeout;
        self
    }

    /// Creates a short link.
    ///
    /// # Code selection
    ///
    /// - A custom code is validated and inserted once. It is never retried or
    ///   replaced on conflict.
    /// - Without a custom code (an empty string counts as none), a code is
    ///   generated and checked against the store, up to
    ///   [`MAX_GENERATION_ATTEMPTS`] times.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] if the URL or custom code is malformed.
    /// Returns [`AppError::CodeConflict`] if the store reports the code as taken,
    /// including when a concurrent create wins the race after the existence check.
    /// Returns [`AppError::CodeGenerationExhausted`] if every candidate collided.
    /// Returns [`AppError::Store`] on store failures.
    pub async fn create_link(
        &self,
        target_url: String,
        custom_code: Option<String>,
    ) -> Result<Link, AppError> {
        validate_target_url(&target_url).map_err(|e| {
            AppError::invalid_input("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        let code = match custom_code.filter(|c| !c.is_empty()) {
            Some(custom) => {
                if !is_valid_code(&custom) {
                    return Err(AppError::invalid_input(
                        "Code must be 6-8 alphanumeric characters",
                        json!({ "code": custom }),
                    ));
                }
                custom
            }
            None => self.generate_unique_code().await?,
        };

        let new_link = NewLink { code, target_url };
        let link = with_deadline(
            self.store_timeout,
            "insert",
            self.repository.insert(new_link),
        )
        .await?;

        info!(code = %link.code, id = link.id, "Link created");
        metrics::counter!("links_created_total").increment(1);

        Ok(link)
    }

    /// Returns all links, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on store failures.
    pub async fn list_links(&self) -> Result<Vec<Link>, AppError> {
        with_deadline(self.store_timeout, "list", self.repository.list_all()).await
    }

    /// Retrieves a link by its code.
    ///
    /// Deleted codes are indistinguishable from codes that never existed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    /// Returns [`AppError::Store`] on store failures.
    pub async fn get_link(&self, code: &str) -> Result<Link, AppError> {
        with_deadline(
            self.store_timeout,
            "find_by_code",
            self.repository.find_by_code(code),
        )
        .await?
        .ok_or_else(|| AppError::not_found("Link not found", json!({ "code": code })))
    }

    /// Deletes the link with `code`.
    ///
    /// Idempotent: deleting a code that does not exist succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on store failures.
    pub async fn delete_link(&self, code: &str) -> Result<(), AppError> {
        let deleted = with_deadline(
            self.store_timeout,
            "delete_by_code",
            self.repository.delete_by_code(code),
        )
        .await?;

        if deleted {
            info!(code, "Link deleted");
        } else {
            debug!(code, "Delete matched no link");
        }

        Ok(())
    }

    /// Checks that the store answers within the deadline.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] if it does not.
    pub async fn ping_store(&self) -> Result<(), AppError> {
        with_deadline(self.store_timeout, "ping", self.repository.ping()).await
    }

    /// Generates a code not currently present in the store.
    async fn generate_unique_code(&self) -> Result<String, AppError> {
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let code = self.generator.generate();

            let existing = with_deadline(
                self.store_timeout,
                "find_by_code",
                self.repository.find_by_code(&code),
            )
            .await?;

            if existing.is_none() {
                return Ok(code);
            }

            debug!(code, attempt, "Generated code collided");
        }

        Err(AppError::CodeGenerationExhausted {
            attempts: MAX_GENERATION_ATTEMPTS,
        })
    }
}
