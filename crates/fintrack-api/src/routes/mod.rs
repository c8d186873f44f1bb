pub mod dashboard;
pub mod session;
pub mod system;
pub mod uploads;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    Router,
};
use fintrack_client::ApiError;
use fintrack_types::ApiErrorDetails;

use crate::middleware::auth::AppState;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(dashboard::routes())
        .merge(session::routes())
        .merge(system::routes())
        .merge(uploads::routes())
        .fallback(not_found)
}

async fn not_found() -> Response {
    let details = ApiErrorDetails::new("NOT_FOUND", "no such route", 404);
    (StatusCode::NOT_FOUND, Json(details)).into_response()
}

/// Failed backend call, rendered as the normalized error body with the backend's status.
#[derive(Debug)]
pub struct ApiFailure(pub ApiError);

impl From<ApiError> for ApiFailure {
    fn from(e: ApiError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let details = self.0.details();
        let status = StatusCode::from_u16(details.status)
            .ok()
            .filter(|s| s.is_client_error() || s.is_server_error())
            .unwrap_or(StatusCode::BAD_GATEWAY);

        if status.is_server_error() {
            tracing::warn!("backend call failed: {}", self.0);
        }
        (status, Json(details)).into_response()
    }
}
