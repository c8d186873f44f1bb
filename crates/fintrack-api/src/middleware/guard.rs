use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use tracing::debug;

use crate::middleware::auth::{resolve_session, AppState};

/// File extensions treated as static assets.
const STATIC_EXTENSIONS: &[&str] = &[
    "html", "htm", "css", "js", "jpg", "jpeg", "webp", "png", "gif", "svg", "ttf", "woff",
    "woff2", "ico", "csv", "doc", "docx", "xls", "xlsx", "zip", "webmanifest",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteClass {
    PublicOnly,
    Protected,
    Neutral,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToDashboard,
    RedirectToSignIn,
}

/// Prefix lists deciding which paths are for signed-out users only and which need a session.
#[derive(Clone, Debug)]
pub struct RoutePatterns {
    public_only: Vec<String>,
    protected: Vec<String>,
}

impl Default for RoutePatterns {
    fn default() -> Self {
        Self {
            public_only: vec!["/sign-in".into(), "/sign-up".into(), "/api/webhooks".into()],
            protected: vec!["/dashboard".into()],
        }
    }
}

impl RoutePatterns {
    pub fn new(public_only: Vec<String>, protected: Vec<String>) -> Self {
        Self {
            public_only,
            protected,
        }
    }

    /// Public-only prefixes are checked first, so a path listed in both is public-only.
    pub fn classify(&self, path: &str) -> RouteClass {
        if self.public_only.iter().any(|p| path.starts_with(p.as_str())) {
            RouteClass::PublicOnly
        } else if self.protected.iter().any(|p| path.starts_with(p.as_str())) {
            RouteClass::Protected
        } else {
            RouteClass::Neutral
        }
    }

    pub fn evaluate(&self, path: &str, hasSession: bool) -> GuardDecision {
        match self.classify(path) {
            RouteClass::PublicOnly if hasSession && !path.starts_with("/api") => {
                GuardDecision::RedirectToDashboard
            }
            RouteClass::Protected if !hasSession => GuardDecision::RedirectToSignIn,
            _ => GuardDecision::Allow,
        }
    }

    /// Asset-looking paths skip session resolution, unless they fall under a guarded
    /// prefix: there an asset-like suffix may just be a path parameter.
    pub fn skips_guard(&self, path: &str) -> bool {
        is_static_asset(path) && self.classify(path) == RouteClass::Neutral
    }
}

/// `/_next*` or a last segment ending in a known asset extension (case-sensitive).
/// API routes are never assets.
pub fn is_static_asset(path: &str) -> bool {
    if path.starts_with("/api") {
        return false;
    }
    if path.starts_with("/_next") {
        return true;
    }

    let lastSegment = path.rsplit('/').next().unwrap_or(path);
    match lastSegment.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => STATIC_EXTENSIONS.contains(&ext),
        _ => false,
    }
}

/// Middleware applied to every route: one decision per request, then either pass through
/// (with the resolved [`Session`](crate::middleware::auth::Session) attached) or redirect.
pub async fn route_guard(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    if state.patterns.skips_guard(&path) {
        return next.run(request).await;
    }

    let session = resolve_session(&state, &jar, request.headers()).await;
    let decision = state.patterns.evaluate(&path, session.is_some());
    debug!(%path, ?decision, "route guard");

    match decision {
        GuardDecision::Allow => {
            if let Some(session) = session {
                request.extensions_mut().insert(session);
            }
            next.run(request).await
        }
        GuardDecision::RedirectToDashboard => {
            Redirect::temporary(&state.auth.dashboard_path).into_response()
        }
        GuardDecision::RedirectToSignIn => Redirect::temporary(&state.auth.sign_in_url).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_path_gets_exactly_one_class() {
        let patterns = RoutePatterns::default();

        assert_eq!(patterns.classify("/sign-in"), RouteClass::PublicOnly);
        assert_eq!(patterns.classify("/sign-up/verify"), RouteClass::PublicOnly);
        assert_eq!(patterns.classify("/api/webhooks/clerk"), RouteClass::PublicOnly);
        assert_eq!(patterns.classify("/dashboard"), RouteClass::Protected);
        assert_eq!(patterns.classify("/dashboard/accounts"), RouteClass::Protected);
        assert_eq!(patterns.classify("/"), RouteClass::Neutral);
        assert_eq!(patterns.classify("/api/session"), RouteClass::Neutral);
    }

    #[test]
    fn signed_in_user_is_sent_away_from_sign_in() {
        let patterns = RoutePatterns::default();
        assert_eq!(
            patterns.evaluate("/sign-in", true),
            GuardDecision::RedirectToDashboard
        );
        assert_eq!(patterns.evaluate("/sign-in", false), GuardDecision::Allow);
    }

    #[test]
    fn anonymous_user_is_sent_to_sign_in_from_dashboard() {
        let patterns = RoutePatterns::default();
        assert_eq!(
            patterns.evaluate("/dashboard/accounts", false),
            GuardDecision::RedirectToSignIn
        );
        assert_eq!(patterns.evaluate("/dashboard/accounts", true), GuardDecision::Allow);
    }

    #[test]
    fn webhooks_stay_reachable_with_a_session() {
        let patterns = RoutePatterns::default();
        assert_eq!(patterns.evaluate("/api/webhooks/x", true), GuardDecision::Allow);
        assert_eq!(patterns.evaluate("/api/webhooks/x", false), GuardDecision::Allow);
    }

    #[test]
    fn neutral_paths_are_always_allowed() {
        let patterns = RoutePatterns::default();
        assert_eq!(patterns.evaluate("/", true), GuardDecision::Allow);
        assert_eq!(patterns.evaluate("/", false), GuardDecision::Allow);
    }

    #[test]
    fn custom_patterns_replace_the_defaults() {
        let patterns = RoutePatterns::new(vec!["/login".into()], vec!["/app".into()]);
        assert_eq!(patterns.classify("/sign-in"), RouteClass::Neutral);
        assert_eq!(patterns.evaluate("/app/x", false), GuardDecision::RedirectToSignIn);
        assert_eq!(patterns.evaluate("/login", true), GuardDecision::RedirectToDashboard);
    }

    #[test]
    fn static_assets_are_recognized() {
        assert!(is_static_asset("/favicon.ico"));
        assert!(is_static_asset("/img/logo.png"));
        assert!(is_static_asset("/_next/static/chunk"));
        assert!(is_static_asset("/_next"));
        assert!(!is_static_asset("/img/logo.PNG"));
        assert!(!is_static_asset("/dashboard/accounts"));
        assert!(!is_static_asset("/api/export.csv"));
        assert!(!is_static_asset("/data.json"));
        assert!(!is_static_asset("/.well-known"));
    }

    #[test]
    fn guarded_prefixes_never_skip_the_guard() {
        let patterns = RoutePatterns::default();
        assert!(patterns.skips_guard("/favicon.ico"));
        assert!(!patterns.skips_guard("/dashboard/sms/receipt.png"));
        assert!(!patterns.skips_guard("/sign-in/logo.svg"));
        assert_eq!(
            patterns.evaluate("/dashboard/sms/receipt.png", false),
            GuardDecision::RedirectToSignIn
        );
    }
}
