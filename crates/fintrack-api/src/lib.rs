#![allow(non_snake_case)]

pub mod middleware;
pub mod routes;

use axum::Router;

use crate::middleware::auth::AppState;

/// Full application router: data routes behind the route guard.
pub fn api_router(state: AppState) -> Router {
    let guardLayer =
        axum::middleware::from_fn_with_state(state.clone(), middleware::guard::route_guard);

    Router::new()
        .merge(routes::api_routes())
        .layer(guardLayer)
        .with_state(state)
}
