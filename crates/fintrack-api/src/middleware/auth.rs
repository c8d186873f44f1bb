use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use axum_extra::extract::CookieJar;
use fintrack_client::{ApiClient, ApiError, StaticToken};
use fintrack_types::{ApiErrorDetails, SessionToken};
use tracing::{debug, warn};

use crate::middleware::guard::RoutePatterns;

#[derive(Clone, Debug)]
pub struct AuthSettings {
    pub session_cookie: String,
    pub sign_in_url: String,
    pub sign_up_url: String,
    pub dashboard_path: String,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            session_cookie: "__session".into(),
            sign_in_url: "/sign-in".into(),
            sign_up_url: "/sign-up".into(),
            dashboard_path: "/dashboard".into(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    /// Shared session client. Only caller-independent calls (health) use it directly;
    /// per-user data goes through a request-scoped client derived from the caller's session.
    pub client: ApiClient,
    pub auth: Arc<AuthSettings>,
    pub patterns: Arc<RoutePatterns>,
    pub validator: Arc<dyn SessionValidator>,
}

impl AppState {
    pub fn new(client: ApiClient, validator: Arc<dyn SessionValidator>) -> Self {
        Self {
            client,
            auth: Arc::new(AuthSettings::default()),
            patterns: Arc::new(RoutePatterns::default()),
            validator,
        }
    }

    pub fn with_auth(mut self, auth: AuthSettings) -> Self {
        self.auth = Arc::new(auth);
        self
    }

    pub fn with_patterns(mut self, patterns: RoutePatterns) -> Self {
        self.patterns = Arc::new(patterns);
        self
    }
}

/// Validated caller, attached to the request by the route guard.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub token: SessionToken,
    pub email: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session validation unavailable: {0}")]
    Unavailable(#[from] ApiError),
}

/// Decides whether a presented session token belongs to a signed-in user.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// `Ok(None)` for a token that is not (or no longer) valid.
    async fn validate(&self, token: &str) -> Result<Option<Session>, SessionError>;
}

/// Accepts exactly one configured token. Meant for local setups and tests.
pub struct StaticSessionValidator {
    token: String,
}

impl StaticSessionValidator {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl SessionValidator for StaticSessionValidator {
    async fn validate(&self, token: &str) -> Result<Option<Session>, SessionError> {
        if token.is_empty() || token != self.token {
            return Ok(None);
        }
        Ok(Some(Session {
            token: SessionToken(token.to_string()),
            email: None,
        }))
    }
}

/// Asks the backend who the token belongs to. A 401/403 means no session; anything else
/// that fails is reported as unavailable.
pub struct RemoteSessionValidator {
    client: ApiClient,
}

impl RemoteSessionValidator {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SessionValidator for RemoteSessionValidator {
    async fn validate(&self, token: &str) -> Result<Option<Session>, SessionError> {
        let scoped = self
            .client
            .configure_server_provider(Arc::new(StaticToken::new(token)));

        match scoped.auth().user().await {
            Ok(user) => Ok(Some(Session {
                token: SessionToken(token.to_string()),
                email: Some(user.email).filter(|e| !e.is_empty()),
            })),
            Err(e) if matches!(e.status(), Some(401 | 403)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Session token from the configured cookie, or from an `Authorization: Bearer` header.
pub fn presented_token(jar: &CookieJar, headers: &HeaderMap, cookieName: &str) -> Option<String> {
    if let Some(cookie) = jar.get(cookieName) {
        let value = cookie.value().trim();
        if !value.is_empty() {
            return Some(value.to_string());
        }
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Resolve the caller's session. Validator failures degrade to "no session".
pub async fn resolve_session(
    state: &AppState,
    jar: &CookieJar,
    headers: &HeaderMap,
) -> Option<Session> {
    let token = presented_token(jar, headers, &state.auth.session_cookie)?;

    match state.validator.validate(&token).await {
        Ok(Some(session)) => Some(session),
        Ok(None) => {
            debug!("presented session token rejected");
            None
        }
        Err(e) => {
            warn!("session validation failed: {e}");
            None
        }
    }
}

/// Extractor handing a handler an [`ApiClient`] bound to the caller's session.
pub struct RequestClient(pub ApiClient);

#[async_trait]
impl FromRequestParts<AppState> for RequestClient {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(session) = parts.extensions.get::<Session>() else {
            let details = ApiErrorDetails::new("UNAUTHORIZED", "no active session", 401);
            return Err((StatusCode::UNAUTHORIZED, Json(details)).into_response());
        };

        let provider = Arc::new(StaticToken::new(session.token.0.clone()));
        Ok(Self(state.client.configure_server_provider(provider)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[tokio::test]
    async fn static_validator_accepts_only_its_token() {
        let validator = StaticSessionValidator::new("sess-1");

        let session = validator.validate("sess-1").await.expect("validates");
        assert_eq!(session.map(|s| s.token), Some(SessionToken("sess-1".into())));
        assert!(validator.validate("other").await.expect("validates").is_none());
        assert!(validator.validate("").await.expect("validates").is_none());
    }

    #[test]
    fn cookie_wins_over_bearer_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("__session=from-cookie"));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        let jar = CookieJar::from_headers(&headers);

        assert_eq!(
            presented_token(&jar, &headers, "__session").as_deref(),
            Some("from-cookie")
        );
    }

    #[test]
    fn bearer_header_is_used_without_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        let jar = CookieJar::from_headers(&headers);

        assert_eq!(presented_token(&jar, &headers, "__session").as_deref(), Some("abc"));

        let empty = HeaderMap::new();
        assert!(presented_token(&CookieJar::from_headers(&empty), &empty, "__session").is_none());
    }
}
