use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use medhome_core::middleware::request_id_layer;

use crate::handlers::{
    auth::{logout, me, request_code, verify_code},
    health::{healthz, readyz},
    visit::{checkin_visit, visits_by_date, visits_today},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/auth/request-code", post(request_code))
        .route("/auth/verify-code", post(verify_code))
        .route("/auth/me", get(me))
        .route("/auth/logout", post(logout))
        // Visits
        .route("/visits/today", get(visits_today))
        .route("/visits/by-date", get(visits_by_date))
        .route("/visits/{id}/checkin", post(checkin_visit))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
