//! Canonical string construction for signed webhook deliveries.
//!
//! The canonical form is a newline-separated byte string of:
//!
//! ```text
//! HTTPRequestMethod\n
//! RequestPath\n
//! SignedHeaders\n
//! Body
//! ```
//!
//! where `SignedHeaders` is `name:value` for every name in the signed-headers
//! directive, in directive order, joined with `;`. Nothing is sorted and the
//! body is appended verbatim without a trailing newline.

use crate::headers::{HeaderLookup, SignedHeaders};
use crate::request::IncomingRequest;

/// Deterministic byte serialization of a request, ready to be digested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalString(Vec<u8>);

impl CanonicalString {
    /// The canonical bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the canonical string is empty. Never true for a built value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume the wrapper and return the bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for CanonicalString {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Build the canonical string from its components.
///
/// This function is total: headers named by the directive but missing from
/// `headers` contribute an empty value, and an empty directive yields an
/// empty header segment.
///
/// # Examples
///
/// ```
/// use hooksig_auth::canonical::canonicalize;
/// use hooksig_auth::headers::HeaderLookup;
///
/// let headers: HeaderLookup = [("content-type", "application/json")].into_iter().collect();
/// let canonical = canonicalize("POST", "/", "content-type", &headers, b"{}");
/// assert_eq!(canonical.as_bytes(), b"POST\n/\ncontent-type:application/json\n{}");
/// ```
#[must_use]
pub fn canonicalize(
    method: &str,
    path: &str,
    directive: &str,
    headers: &HeaderLookup,
    body: &[u8],
) -> CanonicalString {
    let signed = SignedHeaders::parse(directive);
    let header_segment = build_signed_header_segment(&signed, headers);

    let mut out =
        Vec::with_capacity(method.len() + path.len() + header_segment.len() + body.len() + 3);
    out.extend_from_slice(method.as_bytes());
    out.push(b'\n');
    out.extend_from_slice(path.as_bytes());
    out.push(b'\n');
    out.extend_from_slice(&header_segment);
    out.push(b'\n');
    out.extend_from_slice(body);

    CanonicalString(out)
}

/// Canonicalize an [`IncomingRequest`] against a directive value.
#[must_use]
pub fn canonicalize_request(request: &IncomingRequest, directive: &str) -> CanonicalString {
    canonicalize(
        request.method(),
        request.path(),
        directive,
        request.headers(),
        request.body(),
    )
}

/// Build the signed header segment: `name:value` pairs joined with `;`.
///
/// Names are emitted in ASCII lowercase but otherwise untouched, so any
/// whitespace the sender left around a name stays part of it (and usually
/// makes the lookup miss). Values are copied byte-for-byte.
///
/// # Examples
///
/// ```
/// use hooksig_auth::canonical::build_signed_header_segment;
/// use hooksig_auth::headers::{HeaderLookup, SignedHeaders};
///
/// let headers: HeaderLookup = [("X-A", "1"), ("X-B", "2")].into_iter().collect();
/// let segment = build_signed_header_segment(&SignedHeaders::parse("x-b,X-A,x-c"), &headers);
/// assert_eq!(segment, b"x-b:2;x-a:1;x-c:");
/// ```
#[must_use]
pub fn build_signed_header_segment(signed: &SignedHeaders, headers: &HeaderLookup) -> Vec<u8> {
    let mut segment = Vec::new();
    for (i, name) in signed.names().iter().enumerate() {
        if i > 0 {
            segment.push(b';');
        }
        segment.extend_from_slice(name.to_ascii_lowercase().as_bytes());
        segment.push(b':');
        segment.extend_from_slice(headers.get(name).unwrap_or_default());
    }
    segment
}
