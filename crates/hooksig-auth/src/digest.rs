//! HMAC-SHA256 digest computation.

use std::fmt;

use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::canonical::{CanonicalString, canonicalize_request};
use crate::request::IncomingRequest;
use crate::secret::Secret;

type HmacSha256 = Hmac<Sha256>;

/// Length of a hex-encoded HMAC-SHA256 digest.
pub const DIGEST_HEX_LEN: usize = 64;

/// A lowercase hex-encoded HMAC-SHA256 digest (64 characters).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Digest(String);

impl Digest {
    /// The hex digest.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the hex string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Compute `hex(HMAC-SHA256(secret, canonical))`.
///
/// The secret is used as-is; rejecting an empty secret is the verifier's job.
///
/// # Examples
///
/// ```
/// use hooksig_auth::canonical::canonicalize;
/// use hooksig_auth::digest::compute_digest;
/// use hooksig_auth::headers::HeaderLookup;
/// use hooksig_auth::secret::Secret;
///
/// let canonical = canonicalize("POST", "/", "", &HeaderLookup::new(), b"{}");
/// let digest = compute_digest(&canonical, &Secret::from("testsecret"));
/// assert_eq!(digest.as_str().len(), 64);
/// ```
#[must_use]
pub fn compute_digest(canonical: &CanonicalString, secret: &Secret) -> Digest {
    let mut mac = <HmacSha256 as KeyInit>::new_from_slice(secret.as_bytes())
        .expect("HMAC can accept any key length");
    mac.update(canonical.as_bytes());
    Digest(hex::encode(mac.finalize().into_bytes()))
}

/// Produce the signature a sender would attach to `request`.
///
/// Canonicalizes the request against `directive` and digests the result.
#[must_use]
pub fn sign_request(request: &IncomingRequest, directive: &str, secret: &Secret) -> Digest {
    compute_digest(&canonicalize_request(request, directive), secret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::canonicalize;
    use crate::headers::HeaderLookup;

    const GOLDEN_DIGEST: &str = "dcaaa64cae27c37a2e993deb5b3d1c3c70ed0c0d9f294f812cab7ca95b731a24";

    fn golden_headers() -> HeaderLookup {
        [("content-type", "application/json")].into_iter().collect()
    }

    #[test]
    fn test_should_match_golden_vector() {
        let canonical = canonicalize("POST", "/", "content-type", &golden_headers(), b"{}");
        let digest = compute_digest(&canonical, &Secret::from("testsecret"));
        assert_eq!(digest.as_str(), GOLDEN_DIGEST);
    }

    #[test]
    fn test_should_match_digest_for_empty_header_segment() {
        let canonical = canonicalize("POST", "/", "", &HeaderLookup::new(), b"{}");
        let digest = compute_digest(&canonical, &Secret::from("testsecret"));
        assert_eq!(
            digest.as_str(),
            "6b70131f7c9f2a2db55e4071f65d0e446f44f7fc4df13923929c96c128e63ec3"
        );
    }

    #[test]
    fn test_should_produce_lowercase_hex_of_fixed_length() {
        let canonical = canonicalize("PUT", "/x", "a,b", &HeaderLookup::new(), b"body");
        let digest = compute_digest(&canonical, &Secret::from("k"));
        assert_eq!(digest.as_str().len(), DIGEST_HEX_LEN);
        assert!(
            digest
                .as_str()
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }

    #[test]
    fn test_should_be_deterministic() {
        let canonical = canonicalize("POST", "/", "content-type", &golden_headers(), b"{}");
        let secret = Secret::from("testsecret");
        assert_eq!(
            compute_digest(&canonical, &secret),
            compute_digest(&canonical, &secret)
        );
    }

    #[test]
    fn test_should_change_digest_when_key_changes() {
        let canonical = canonicalize("POST", "/", "content-type", &golden_headers(), b"{}");
        assert_ne!(
            compute_digest(&canonical, &Secret::from("testsecret")),
            compute_digest(&canonical, &Secret::from("testsecreT"))
        );
    }

    #[test]
    fn test_should_change_digest_when_any_body_byte_flips() {
        let secret = Secret::from("testsecret");
        let body = br#"{"sys":{"id":"abc"}}"#.to_vec();
        let baseline = compute_digest(
            &canonicalize("POST", "/", "content-type", &golden_headers(), &body),
            &secret,
        );
        for i in 0..body.len() {
            let mut tampered = body.clone();
            tampered[i] ^= 0x01;
            let digest = compute_digest(
                &canonicalize("POST", "/", "content-type", &golden_headers(), &tampered),
                &secret,
            );
            assert_ne!(digest, baseline, "flipping byte {i} left the digest unchanged");
        }
    }

    #[test]
    fn test_should_sign_request_like_manual_pipeline() {
        let request = IncomingRequest::new("POST", "/", golden_headers(), &b"{}"[..]);
        let digest = sign_request(&request, "content-type", &Secret::from("testsecret"));
        assert_eq!(digest.to_string(), GOLDEN_DIGEST);
    }
}
