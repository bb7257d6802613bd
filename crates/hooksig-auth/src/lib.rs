//! HMAC-SHA256 webhook signature verification for hooksig.
//!
//! This crate authenticates inbound webhook deliveries. The sender signs a
//! canonical representation of the request with a shared secret and sends the
//! hex digest alongside it; the receiver rebuilds the same canonical string,
//! recomputes the digest and compares the two in constant time.
//!
//! # Overview
//!
//! Verification is a linear pipeline:
//!
//! 1. [`canonical`] builds `METHOD\nPATH\nname:value;...\nBODY` from the
//!    request and the sender's signed-headers directive.
//! 2. [`digest`] computes `hex(HMAC-SHA256(secret, canonical))`.
//! 3. [`verify`] compares the result with the supplied digest.
//!
//! Everything is synchronous, allocation-light and free of shared mutable
//! state.
//!
//! # Usage
//!
//! ```rust
//! use hooksig_auth::{HeaderLookup, IncomingRequest, Secret, VerificationOutcome, WebhookVerifier};
//!
//! let verifier = WebhookVerifier::new(Some(Secret::from("testsecret")));
//! let headers: HeaderLookup = [("content-type", "application/json")].into_iter().collect();
//! let request = IncomingRequest::new("POST", "/", headers, &b"{}"[..]);
//!
//! let outcome = verifier.verify(
//!     &request,
//!     "content-type",
//!     "dcaaa64cae27c37a2e993deb5b3d1c3c70ed0c0d9f294f812cab7ca95b731a24",
//! );
//! assert_eq!(outcome, VerificationOutcome::Verified);
//! ```
//!
//! # Modules
//!
//! - [`canonical`] - Canonical string construction
//! - [`digest`] - HMAC-SHA256 digest computation and request signing
//! - [`error`] - Authentication error types
//! - [`headers`] - Case-insensitive header lookup and directive parsing
//! - [`request`] - The inbound delivery
//! - [`secret`] - The signing secret
//! - [`verify`] - Constant-time verification and the verifier

pub mod canonical;
pub mod digest;
pub mod error;
pub mod headers;
pub mod request;
pub mod secret;
pub mod verify;

pub use canonical::{CanonicalString, canonicalize};
pub use digest::{Digest, compute_digest, sign_request};
pub use error::AuthError;
pub use headers::{HeaderLookup, SignedHeaders};
pub use request::IncomingRequest;
pub use secret::Secret;
pub use verify::{VerificationOutcome, WebhookVerifier, digests_match, verify_webhook};

/// Conventional header carrying the sender's hex digest.
pub const SIGNATURE_HEADER: &str = "x-contentful-signature";

/// Conventional header carrying the signed-headers directive.
pub const SIGNED_HEADERS_HEADER: &str = "x-contentful-signed-headers";
