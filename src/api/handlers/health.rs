//! Handler for health check endpoint.

use axum::{Json, extract::State};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns liveness plus component diagnostics.
///
/// # Endpoint
///
/// `GET /healthz`
///
/// Always answers 200 with `ok: true` while the process serves requests.
/// Store and cache problems are reported under `checks` only.
///
/// # Response
///
/// ```json
/// {
///   "ok": true,
///   "version": "1.0.0",
///   "checks": {
///     "store": { "status": "ok", "message": "Store reachable" },
///     "cache": { "status": "ok", "message": "Cache backend: redis" }
///   }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = check_store(&state).await;
    let cache = check_cache(&state).await;

    Json(HealthResponse {
        ok: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks { store, cache },
    })
}

async fn check_store(state: &AppState) -> CheckStatus {
    match state.link_service.ping_store().await {
        Ok(()) => CheckStatus::ok("Store reachable"),
        Err(e) => CheckStatus::error(format!("Store error: {}", e)),
    }
}

async fn check_cache(state: &AppState) -> CheckStatus {
    let backend = state.cache.backend();

    if state.cache.health_check().await {
        CheckStatus::ok(format!("Cache backend: {}", backend))
    } else {
        CheckStatus::error(format!("Cache backend {} unreachable", backend))
    }
}
