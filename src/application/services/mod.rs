//! Business logic services for the application layer.

pub mod click_service;
pub mod link_service;

pub use click_service::{ClickOutcome, ClickService};
pub use link_service::LinkService;

use crate::error::AppError;
use std::future::Future;
use std::time::Duration;

/// Deadline applied to a single store call unless configured otherwise.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Runs a store call under `deadline`.
///
/// An expired deadline is reported as [`AppError::Store`], the same as any
/// other store failure.
pub(crate) async fn with_deadline<T, F>(
    deadline: Duration,
    operation: &'static str,
    call: F,
) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    match tokio::time::timeout(deadline, call).await {
        Ok(result) => result,
        Err(_) => Err(AppError::store(format!(
            "{operation} exceeded deadline of {}ms",
            deadline.as_millis()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_with_deadline_passes_result_through() {
        let result = with_deadline(Duration::from_secs(1), "find", async { Ok(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_with_deadline_passes_error_through() {
        let result: Result<(), _> = with_deadline(Duration::from_secs(1), "insert", async {
            Err(AppError::code_conflict("abc123"))
        })
        .await;

        assert!(matches!(result, Err(AppError::CodeConflict { .. })));
    }

    #[tokio::test]
    async fn test_with_deadline_expiry_is_store_error() {
        let result: Result<(), _> = with_deadline(Duration::from_millis(10), "list", async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await;

        match result {
            Err(AppError::Store(message)) => assert!(message.contains("list")),
            other => panic!("expected store error, got {other:?}"),
        }
    }
}
