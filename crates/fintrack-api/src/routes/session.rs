use axum::{extract::State, routing::get, Extension, Json, Router};
use serde::Serialize;

use crate::middleware::auth::{AppState, Session};

#[derive(Serialize)]
struct SessionInfo {
    authenticated: bool,
    email: Option<String>,
    sign_in_url: String,
    sign_up_url: String,
    dashboard_path: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/session", get(get_session))
}

/// Who the caller is, plus where the sign-in/sign-up pages and dashboard live.
async fn get_session(
    State(state): State<AppState>,
    session: Option<Extension<Session>>,
) -> Json<SessionInfo> {
    let session = session.map(|Extension(s)| s);
    Json(SessionInfo {
        authenticated: session.is_some(),
        email: session.and_then(|s| s.email),
        sign_in_url: state.auth.sign_in_url.clone(),
        sign_up_url: state.auth.sign_up_url.clone(),
        dashboard_path: state.auth.dashboard_path.clone(),
    })
}
