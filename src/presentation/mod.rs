// Presentation layer - HTTP adapter over the dashboard session
pub mod app_state;
pub mod error_response;
pub mod handlers;

use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{get_dashboard, health_check, list_tabs, refresh, select_tab};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/tabs", get(list_tabs))
        .route("/tabs/:id", post(select_tab))
        .route("/dashboard", get(get_dashboard))
        .route("/refresh", post(refresh))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
