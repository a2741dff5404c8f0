use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use libsubprobe::Prober;
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
    pub prober: Prober,
    pub parent_domain: Arc<str>,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub is_available: bool,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/check-subdomain/{subdomain}", get(check_subdomain))
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn check_subdomain(
    State(state): State<AppState>,
    Path(subdomain): Path<String>,
) -> Json<AvailabilityResponse> {
    let outcome = state.prober.check(&subdomain, &state.parent_domain).await;

    Json(AvailabilityResponse {
        is_available: outcome.is_available(),
    })
}
