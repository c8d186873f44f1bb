use std::sync::Arc;

use tracing::{debug, warn};

use crate::token::{ProviderSlot, SharedTokenProvider};

#[derive(Clone)]
enum Credentials {
    /// Long-lived session: one provider slot shared by every clone of the client.
    Session(Arc<ProviderSlot>),
    /// Bound to a single server-side request. Never reaches the session slot.
    Request(SharedTokenProvider),
}

/// Handle used by the service stubs to reach the finance API.
///
/// Clones of a session client share their provider slot. Request-scoped clients made by
/// [`ApiClient::configure_server_provider`] share only the connection pool.
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) http: reqwest::Client,
    base_url: Arc<str>,
    credentials: Credentials,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url)
    }

    pub fn with_http_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let baseUrl: String = base_url.into();
        Self {
            http,
            base_url: Arc::from(baseUrl.trim_end_matches('/')),
            credentials: Credentials::Session(Arc::new(ProviderSlot::default())),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_request_scoped(&self) -> bool {
        matches!(self.credentials, Credentials::Request(_))
    }

    /// Register the session-wide credential source. Re-registering the same `Arc` is a
    /// no-op and returns `false`.
    pub fn configure_client_provider(&self, provider: SharedTokenProvider) -> bool {
        match &self.credentials {
            Credentials::Session(slot) => {
                let replaced = slot.configure(provider);
                if replaced {
                    debug!("api client token provider configured");
                }
                replaced
            }
            Credentials::Request(_) => {
                warn!("ignoring client provider registration on a request-scoped api client");
                false
            }
        }
    }

    /// Drop the session provider; later dispatches go out anonymously.
    pub fn reset_client_provider(&self) {
        if let Credentials::Session(slot) = &self.credentials {
            slot.reset();
            debug!("api client token provider reset");
        }
    }

    pub fn is_client_configured(&self) -> bool {
        match &self.credentials {
            Credentials::Session(slot) => slot.is_configured(),
            Credentials::Request(_) => false,
        }
    }

    /// Build a client bound to one server-side request. The returned value owns
    /// `provider` and must not outlive or be shared beyond that request.
    pub fn configure_server_provider(&self, provider: SharedTokenProvider) -> ApiClient {
        ApiClient {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            credentials: Credentials::Request(provider),
        }
    }

    /// Snapshot of the provider a dispatch starting now should use.
    pub(crate) fn active_provider(&self) -> Option<SharedTokenProvider> {
        match &self.credentials {
            Credentials::Session(slot) => slot.current(),
            Credentials::Request(provider) => Some(provider.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::StaticToken;

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let client = ApiClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn session_clones_share_the_provider_slot() {
        let client = ApiClient::new("http://localhost:8080");
        let clone = client.clone();

        client.configure_client_provider(Arc::new(StaticToken::new("abc")));
        assert!(clone.is_client_configured());

        clone.reset_client_provider();
        assert!(!client.is_client_configured());
    }

    #[test]
    fn server_provider_does_not_touch_the_session_slot() {
        let client = ApiClient::new("http://localhost:8080");
        let scoped = client.configure_server_provider(Arc::new(StaticToken::new("request")));

        assert!(scoped.is_request_scoped());
        assert!(!client.is_client_configured());
        assert!(!scoped.configure_client_provider(Arc::new(StaticToken::new("other"))));
        assert!(client.active_provider().is_none());
    }
}
