//! Authentication error types.

/// Errors produced while verifying a signed webhook delivery.
///
/// Canonicalization and digesting are total, so the only failures are a
/// missing signing secret and a digest that does not match.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No signing secret is configured, or the configured secret is empty.
    #[error("signing secret is not configured")]
    MissingSecret,

    /// The digest supplied by the sender does not match the computed one.
    #[error("the request signature does not match the computed signature")]
    SignatureDoesNotMatch,
}

impl AuthError {
    /// Whether this error stems from server configuration rather than the request.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::MissingSecret)
    }
}
