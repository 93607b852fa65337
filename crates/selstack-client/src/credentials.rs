//! Credential providers for the dispatch facade.
//!
//! Token acquisition and renewal belong to the embedding application; the
//! client only reads the current value at call time and never caches it
//! beyond a single call.

use selstack_model::Credentials;

/// Supplies the auth token attached to outgoing requests.
///
/// Implementations may refresh the token in the background; the facade
/// calls [`current`](Self::current) once per operation.
pub trait CredentialProvider: Send + Sync {
    /// The credentials to attach right now, or `None` for unauthenticated
    /// calls.
    fn current(&self) -> Option<Credentials>;
}

/// A fixed token that never changes.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    /// Create a provider from a token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(token),
        }
    }

    /// Read the token from `SELSTACK_AUTH_TOKEN`, if set.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        std::env::var("SELSTACK_AUTH_TOKEN").ok().map(Self::new)
    }
}

impl CredentialProvider for StaticCredentials {
    fn current(&self) -> Option<Credentials> {
        Some(self.credentials.clone())
    }
}

/// Never supplies a token. Usable only against public containers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl CredentialProvider for Anonymous {
    fn current(&self) -> Option<Credentials> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_supply_static_token() {
        let provider = StaticCredentials::new("tok-123");
        assert_eq!(provider.current().map(|c| c.token), Some("tok-123".into()));
    }

    #[test]
    fn test_should_supply_no_token_when_anonymous() {
        assert!(Anonymous.current().is_none());
    }
}
