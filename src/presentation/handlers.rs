// HTTP request handlers
use crate::application::dashboard_service::DashboardError;
use crate::domain::navigation::Tab;
use crate::domain::render_model::View;
use crate::presentation::app_state::AppState;
use crate::presentation::error_response::ApiError;
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct TabEntry {
    pub id: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Tab bar entries, in display order
pub async fn list_tabs(State(state): State<Arc<AppState>>) -> Json<Vec<TabEntry>> {
    let active = state.session.lock().await.active_tab();
    let tabs = Tab::ALL
        .into_iter()
        .map(|tab| TabEntry {
            id: tab.id(),
            label: tab.label(),
            active: tab == active,
        })
        .collect();
    Json(tabs)
}

/// The view currently on display
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<View> {
    Json(state.session.lock().await.view().clone())
}

pub async fn select_tab(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<View>, ApiError> {
    let mut session = state.session.lock().await;
    let view = session.select_tab(&id)?.clone();
    Ok(Json(view))
}

/// Reload every collection from the record source and recompose the active tab
pub async fn refresh(State(state): State<Arc<AppState>>) -> Result<Json<View>, ApiError> {
    let records = state.source.load().await.map_err(DashboardError::from)?;

    let mut session = state.session.lock().await;
    let view = session.replace_records(records)?.clone();
    Ok(Json(view))
}
