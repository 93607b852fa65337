//! Credentials attached to outgoing requests.

/// An authentication token for the storage service.
///
/// The dispatch facade reads the current value from its credential provider
/// on every call and attaches it as `X-Auth-Token`; tokens are never stored
/// inside request objects.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// The auth token value.
    pub token: String,
}

impl Credentials {
    /// Create credentials from a token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"[REDACTED]")
            .finish()
    }
}
