use axum::{
    Router,
    routing::{get, post},
    extract::{State, Json},
    http::{header, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use crate::feed::{FeedControl, FeedState, FeedTarget};
use crate::observability::metrics::gather_text;
use crate::types::address::parse_address;

pub struct ApiState {
    pub feed: FeedControl,
}

pub fn create_router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/prices", get(get_prices))
        .route("/refresh", post(refresh))
        .route("/target", post(set_target))
        .route("/metrics", get(metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn get_prices(State(state): State<Arc<ApiState>>) -> Json<FeedState> {
    Json(state.feed.state())
}

async fn refresh(State(state): State<Arc<ApiState>>) -> StatusCode {
    match state.feed.refresh() {
        Ok(()) => StatusCode::ACCEPTED,
        Err(e) => {
            tracing::error!("Refresh rejected: {}", e);
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

#[derive(Deserialize)]
struct TargetRequest {
    address: Option<String>,
    symbols: Option<Vec<String>>,
}

async fn set_target(
    State(state): State<Arc<ApiState>>,
    Json(req): Json<TargetRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    let address = req.address
        .as_deref()
        .map(parse_address)
        .transpose()
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    state.feed
        .set_target(FeedTarget::new(address, req.symbols))
        .map_err(|e| (StatusCode::SERVICE_UNAVAILABLE, e.to_string()))?;

    tracing::info!("Feed target updated via API");
    Ok(StatusCode::ACCEPTED)
}

async fn metrics() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        gather_text(),
    )
}
