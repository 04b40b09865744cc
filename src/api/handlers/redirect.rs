//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use tracing::{debug, warn};
use url::Url;

use crate::application::services::ClickOutcome;
use crate::domain::entities::Link;
use crate::error::AppError;
use crate::state::AppState;

const NOT_FOUND_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Link Not Found</title></head>
<body>
<h1>Link Not Found</h1>
<p>This short link does not exist or has been deleted.</p>
</body>
</html>
"#;

/// Redirects a short code to its target URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Look the target up in the cache, falling back to the store
/// 2. On a store hit, fill the cache and re-check the store
/// 3. Record the click (failures are absorbed by the click service)
/// 4. Return 302 Found
///
/// A missing code renders an HTML "not found" page with status 404. A cache
/// hit whose click finds no link is treated as missing and evicted. Click
/// tracking failures never turn a found link into an error.
///
/// # Errors
///
/// Returns 500 if the store fails while resolving an uncached code.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let (target_url, from_cache) = match lookup_target(&state, &code).await {
        Ok(found) => found,
        Err(AppError::NotFound { .. }) => return Ok(not_found_page()),
        Err(e) => return Err(e),
    };

    let outcome = state.click_service.record_click(&code).await;
    debug!(code, ?outcome, "Click processed");

    if outcome == ClickOutcome::LinkMissing {
        evict(&state, &code).await;
        if from_cache {
            return Ok(not_found_page());
        }
    }

    Ok((StatusCode::FOUND, [(header::LOCATION, location(&target_url))]).into_response())
}

fn not_found_page() -> Response {
    (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE)).into_response()
}

/// Builds the `Location` value, falling back to the parser's serialization
/// for stored targets that are not valid header bytes.
fn location(target_url: &str) -> HeaderValue {
    if let Ok(value) = HeaderValue::from_str(target_url) {
        return value;
    }

    warn!(target_url, "Stored target is not a valid header value, normalizing");

    Url::parse(target_url)
        .ok()
        .and_then(|url| HeaderValue::from_str(url.as_str()).ok())
        .unwrap_or_else(|| HeaderValue::from_static("/"))
}

/// Returns the target URL and whether it came from the cache.
async fn lookup_target(state: &AppState, code: &str) -> Result<(String, bool), AppError> {
    match state.cache.get_target(code).await {
        Ok(Some(target_url)) => {
            debug!(code, "Cache HIT");
            return Ok((target_url, true));
        }
        Ok(None) => debug!(code, "Cache MISS"),
        Err(e) => warn!(error = %e, code, "Cache error, falling back to store"),
    }

    let link = state.click_service.resolve(code).await?;
    fill_cache(state, &link).await;

    Ok((link.target_url, false))
}

/// Caches the resolved target, then confirms the store still maps the code
/// to it. A delete or re-create that raced the fill evicts the entry.
async fn fill_cache(state: &AppState, link: &Link) {
    if let Err(e) = state
        .cache
        .set_target(&link.code, &link.target_url, None)
        .await
    {
        warn!(error = %e, code = %link.code, "Failed to cache target");
        return;
    }

    match state.click_service.resolve(&link.code).await {
        Ok(current) if current.target_url == link.target_url => {}
        _ => evict(state, &link.code).await,
    }
}

async fn evict(state: &AppState, code: &str) {
    if let Err(e) = state.cache.invalidate(code).await {
        warn!(error = %e, code, "Failed to invalidate cache entry");
    }
}
