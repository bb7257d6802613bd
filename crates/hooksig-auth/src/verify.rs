//! Signature verification.
//!
//! A verification is a single synchronous pass:
//!
//! ```text
//! Start -> Canonicalized -> Digested -> Verified | Mismatch
//!   \-> ConfigError (no usable secret)
//! ```
//!
//! Nothing is cached or retried, and the outcome depends only on the request
//! and the secret.

use std::fmt;

use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use crate::canonical::canonicalize_request;
use crate::digest::{Digest, compute_digest};
use crate::error::AuthError;
use crate::request::IncomingRequest;
use crate::secret::Secret;

/// Result of verifying one delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerificationOutcome {
    /// The provided digest matches the computed one.
    Verified,
    /// The provided digest differs from the computed one.
    Mismatch,
    /// No usable signing secret is configured.
    ConfigError,
}

impl VerificationOutcome {
    /// Whether the delivery was authenticated.
    #[must_use]
    pub fn is_verified(self) -> bool {
        matches!(self, Self::Verified)
    }

    /// Stable label for logs and metrics.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Verified => "verified",
            Self::Mismatch => "mismatch",
            Self::ConfigError => "config_error",
        }
    }
}

impl fmt::Display for VerificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<T> From<&Result<T, AuthError>> for VerificationOutcome {
    fn from(result: &Result<T, AuthError>) -> Self {
        match result {
            Ok(_) => Self::Verified,
            Err(AuthError::SignatureDoesNotMatch) => Self::Mismatch,
            Err(AuthError::MissingSecret) => Self::ConfigError,
        }
    }
}

/// Compare a computed digest with the one supplied by the sender.
///
/// The comparison runs in constant time over the byte contents. Any
/// difference in length, letter case or content is a mismatch.
#[must_use]
pub fn digests_match(computed: &Digest, provided: &str) -> bool {
    computed.as_str().as_bytes().ct_eq(provided.as_bytes()).into()
}

/// Verify a delivery against `provided`, the sender's digest.
///
/// Returns the computed digest on success.
///
/// # Errors
///
/// Returns [`AuthError::MissingSecret`] without touching the request when
/// `secret` is absent or empty, and [`AuthError::SignatureDoesNotMatch`] when
/// the digests differ.
pub fn verify_webhook(
    request: &IncomingRequest,
    directive: &str,
    provided: &str,
    secret: Option<&Secret>,
) -> Result<Digest, AuthError> {
    let secret = secret
        .filter(|s| !s.is_empty())
        .ok_or(AuthError::MissingSecret)?;

    let canonical = canonicalize_request(request, directive);

    debug!(
        method = %request.method(),
        path = %request.path(),
        directive = %directive,
        canonical_len = canonical.len(),
        "Built canonical string"
    );

    let computed = compute_digest(&canonical, secret);

    if digests_match(&computed, provided) {
        debug!("Webhook signature verified");
        Ok(computed)
    } else {
        debug!(
            method = %request.method(),
            path = %request.path(),
            provided_len = provided.len(),
            "Webhook signature mismatch"
        );
        Err(AuthError::SignatureDoesNotMatch)
    }
}

/// Verifier bound to the process-wide signing secret.
///
/// The secret is injected once at construction and never changes, so a
/// single verifier can be shared across threads behind an `Arc`.
#[derive(Debug, Clone)]
pub struct WebhookVerifier {
    secret: Option<Secret>,
}

impl WebhookVerifier {
    /// Create a verifier. `None` means no secret was provisioned.
    #[must_use]
    pub fn new(secret: Option<Secret>) -> Self {
        Self { secret }
    }

    /// Whether a usable (present and non-empty) secret is configured.
    #[must_use]
    pub fn has_secret(&self) -> bool {
        self.secret.as_ref().is_some_and(|s| !s.is_empty())
    }

    /// Verify a delivery and return the outcome.
    #[must_use]
    pub fn verify(
        &self,
        request: &IncomingRequest,
        directive: &str,
        provided: &str,
    ) -> VerificationOutcome {
        let result = verify_webhook(request, directive, provided, self.secret.as_ref());
        if result.as_ref().is_err_and(AuthError::is_config_error) {
            warn!("Webhook verification attempted without a signing secret");
        }
        VerificationOutcome::from(&result)
    }
}
