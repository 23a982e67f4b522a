use axum::extract::State;
use axum::http::StatusCode;

use crate::state::AppState;

/// `GET /healthz` — liveness. The process is up and serving.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// `GET /readyz` — readiness. The service depends on Postgres for every
/// operation, so readiness is a database round-trip.
pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    match state.db.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "readiness probe failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
