use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token provider unavailable: {0}")]
    Unavailable(String),
}

/// Source of the bearer credential attached to outgoing API calls.
///
/// `Ok(None)` means the caller is anonymous. Dispatch treats an error the same way.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn token(&self) -> Result<Option<String>, TokenError>;
}

pub type SharedTokenProvider = Arc<dyn TokenProvider>;

/// Provider that always yields the same credential, or none.
#[derive(Clone, Debug)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn token(&self) -> Result<Option<String>, TokenError> {
        Ok(self.0.clone())
    }
}

/// Adapter turning an async closure into a [`TokenProvider`].
pub struct FnTokenProvider<F>(F);

pub fn provider_fn<F, Fut>(f: F) -> FnTokenProvider<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<Option<String>, TokenError>> + Send,
{
    FnTokenProvider(f)
}

#[async_trait]
impl<F, Fut> TokenProvider for FnTokenProvider<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<Option<String>, TokenError>> + Send,
{
    async fn token(&self) -> Result<Option<String>, TokenError> {
        (self.0)().await
    }
}

/// Holder for the long-lived session's provider. Writers swap the whole `Arc`;
/// readers clone it out and never hold the lock across an await.
#[derive(Default)]
pub struct ProviderSlot {
    current: RwLock<Option<SharedTokenProvider>>,
}

impl ProviderSlot {
    /// Returns `false` when `provider` is the one already registered.
    pub fn configure(&self, provider: SharedTokenProvider) -> bool {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = current.as_ref() {
            if same_provider(existing, &provider) {
                return false;
            }
        }
        *current = Some(provider);
        true
    }

    pub fn reset(&self) {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = None;
    }

    pub fn current(&self) -> Option<SharedTokenProvider> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_configured(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

fn same_provider(a: &SharedTokenProvider, b: &SharedTokenProvider) -> bool {
    // Compare data pointers only; vtable pointers are not stable across codegen units.
    std::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}

/// Await the provider's credential, collapsing failures and blank tokens to `None`.
pub(crate) async fn resolve_token(provider: Option<&SharedTokenProvider>) -> Option<String> {
    let provider = provider?;
    match provider.token().await {
        Ok(Some(token)) if !token.trim().is_empty() => Some(token),
        Ok(_) => {
            debug!("token provider returned no credential, dispatching anonymously");
            None
        }
        Err(e) => {
            warn!(error = %e, "token provider failed, dispatching anonymously");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configure_is_idempotent_for_the_same_provider() {
        let slot = ProviderSlot::default();
        let provider: SharedTokenProvider = Arc::new(StaticToken::new("abc"));

        assert!(slot.configure(provider.clone()));
        assert!(!slot.configure(provider.clone()));
        assert!(slot.is_configured());
    }

    #[test]
    fn configure_replaces_a_different_provider() {
        let slot = ProviderSlot::default();
        let first: SharedTokenProvider = Arc::new(StaticToken::new("first"));
        let second: SharedTokenProvider = Arc::new(StaticToken::new("second"));

        slot.configure(first);
        assert!(slot.configure(second.clone()));

        let current = slot.current().expect("provider registered");
        assert!(same_provider(&current, &second));
    }

    #[test]
    fn reset_clears_the_slot() {
        let slot = ProviderSlot::default();
        slot.configure(Arc::new(StaticToken::new("abc")));
        slot.reset();

        assert!(!slot.is_configured());
        assert!(slot.current().is_none());
    }

    #[tokio::test]
    async fn blank_and_failed_tokens_resolve_to_none() {
        let blank: SharedTokenProvider = Arc::new(StaticToken::new("   "));
        assert_eq!(resolve_token(Some(&blank)).await, None);

        let failing: SharedTokenProvider = Arc::new(provider_fn(|| async {
            Err(TokenError::Unavailable("identity provider offline".into()))
        }));
        assert_eq!(resolve_token(Some(&failing)).await, None);

        assert_eq!(resolve_token(None).await, None);
    }

    #[tokio::test]
    async fn closure_provider_yields_its_token() {
        let provider: SharedTokenProvider =
            Arc::new(provider_fn(|| async { Ok(Some("from-closure".to_string())) }));
        assert_eq!(
            resolve_token(Some(&provider)).await.as_deref(),
            Some("from-closure")
        );
    }
}
