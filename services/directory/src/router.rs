use axum::{
    Router,
    routing::{get, patch, post},
};
use tower_http::trace::TraceLayer;

use yearbook_core::health::{healthz, readyz};
use yearbook_core::middleware::request_id_layer;

use crate::handlers::{
    member::{get_profile, register_member},
    otp::{request_otp, update_profile},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Members
        .route("/members", post(register_member))
        .route("/members/{identifier}", get(get_profile))
        // Passcode flow
        .route("/members/{identifier}/otp", post(request_otp))
        .route("/members/{identifier}/profile", patch(update_profile))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
