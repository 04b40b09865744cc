//! Handlers for link management endpoints (create, list, get, delete).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::link::{CreateLinkRequest, LinkResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// {
///   "target_url": "https://example.com",
///   "code": "promo25"   // optional, 6-8 alphanumeric characters
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request for a malformed URL or code
/// - 409 Conflict if the custom code is taken
/// - 500 if no unique code could be generated or the store failed
///
/// Any cached target for the code is dropped, since a previously deleted
/// link may have left an entry behind.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .create_link(payload.target_url, payload.code)
        .await?;

    if let Err(e) = state.cache.invalidate(&link.code).await {
        tracing::warn!(error = %e, code = %link.code, "Failed to invalidate cache after create");
    }

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// Lists all links, newest first.
///
/// # Endpoint
///
/// `GET /api/links`
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.link_service.list_links().await?;

    Ok(Json(links.into_iter().map(LinkResponse::from).collect()))
}

/// Returns a single link with its click analytics.
///
/// # Endpoint
///
/// `GET /api/links/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if no link has this code.
pub async fn get_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.get_link(&code).await?;

    Ok(Json(link.into()))
}

/// Hard-deletes a link.
///
/// # Endpoint
///
/// `DELETE /api/links/{code}`
///
/// # Behavior
///
/// Always answers 204 unless the store fails, whether or not the code
/// existed. The cached redirect target is invalidated.
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.link_service.delete_link(&code).await?;

    if let Err(e) = state.cache.invalidate(&code).await {
        tracing::warn!(error = %e, code, "Failed to invalidate cache after delete");
    }

    Ok(StatusCode::NO_CONTENT)
}
