#![allow(non_snake_case)]

mod config;

use std::sync::Arc;

use fintrack_api::middleware::auth::{
    AppState, AuthSettings, RemoteSessionValidator, SessionValidator, StaticSessionValidator,
};
use fintrack_api::middleware::guard::RoutePatterns;
use fintrack_client::{ApiClient, StaticToken};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{Config, ValidationMode};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let configPath = if let Some(idx) = args.iter().position(|a| a == "--config") {
        args.get(idx + 1)
            .cloned()
            .unwrap_or_else(|| "config.example.toml".into())
    } else {
        "config.example.toml".into()
    };

    let appConfig =
        config::load(&configPath).with_api_url_override(std::env::var(config::API_URL_ENV).ok());
    tracing::info!(
        "loaded config from {configPath}: bind={}:{} api={} validation={:?}",
        appConfig.server.bind,
        appConfig.server.port,
        appConfig.api.base_url,
        appConfig.auth.validation
    );

    let client = ApiClient::new(appConfig.api.base_url.clone());
    if let Some(token) = appConfig.api.service_token.clone() {
        client.configure_client_provider(Arc::new(StaticToken::new(token)));
    }
    tokio::spawn(check_backend(client.clone()));

    let appState = build_state(&appConfig, client);
    let app = fintrack_api::api_router(appState).layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", appConfig.server.bind, appConfig.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on {addr}");
    axum::serve(listener, app.into_make_service()).await
}

fn build_state(appConfig: &Config, client: ApiClient) -> AppState {
    let validator: Arc<dyn SessionValidator> = match appConfig.auth.validation {
        ValidationMode::Remote => Arc::new(RemoteSessionValidator::new(client.clone())),
        ValidationMode::Static => {
            let token = appConfig.auth.token.clone().unwrap_or_default();
            if token.is_empty() {
                tracing::warn!("static session validation without a token; every session will be rejected");
            }
            Arc::new(StaticSessionValidator::new(token))
        }
    };

    let auth = AuthSettings {
        session_cookie: appConfig.auth.session_cookie.clone(),
        sign_in_url: appConfig.auth.sign_in_url.clone(),
        sign_up_url: appConfig.auth.sign_up_url.clone(),
        dashboard_path: appConfig.auth.dashboard_path.clone(),
    };
    let patterns = RoutePatterns::new(
        appConfig.guard.public_only.clone(),
        appConfig.guard.protected.clone(),
    );

    AppState::new(client, validator)
        .with_auth(auth)
        .with_patterns(patterns)
}

/// One-off backend health check at startup; failure is logged, never fatal.
async fn check_backend(client: ApiClient) {
    match client.system().health().await {
        Ok(health) if health.is_healthy() => {
            tracing::info!("backend at {} is {}", client.base_url(), health.status);
        }
        Ok(health) => {
            let failing: Vec<&str> = health
                .checks
                .iter()
                .filter(|(_, check)| !check.status.eq_ignore_ascii_case("healthy"))
                .map(|(name, _)| name.as_str())
                .collect();
            tracing::warn!(
                "backend at {} reports {} (failing checks: {failing:?})",
                client.base_url(),
                health.status
            );
        }
        Err(e) => tracing::warn!("backend health check failed: {}", e.human_message()),
    }
}
