use axum::{extract::State, routing::get, Json, Router};
use fintrack_types::HealthResponse;

use crate::middleware::auth::AppState;
use crate::routes::ApiFailure;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/health", get(get_health))
}

/// Backend health, relayed through the shared session client.
async fn get_health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiFailure> {
    let health = state.client.system().health().await?;
    Ok(Json(health))
}
