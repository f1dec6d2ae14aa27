// Maps dashboard errors to JSON error responses
use crate::application::dashboard_service::DashboardError;
use crate::application::record_source::SourceError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug)]
pub struct ApiError(pub DashboardError);

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            DashboardError::UnknownTab(_) => StatusCode::NOT_FOUND,
            DashboardError::Source(SourceError::Io { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
            DashboardError::Validation(_)
            | DashboardError::Domain(_)
            | DashboardError::Source(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        } else {
            tracing::warn!("Request rejected: {}", self.0);
        }

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
