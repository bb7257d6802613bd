//! The inbound delivery as seen by the verifier.

use bytes::Bytes;

use crate::headers::HeaderLookup;

/// A received webhook delivery: method, path, headers and raw body.
///
/// Method and path are kept exactly as received. The value is immutable once
/// built; only accessors are exposed.
#[derive(Debug, Clone)]
pub struct IncomingRequest {
    method: String,
    path: String,
    headers: HeaderLookup,
    body: Bytes,
}

impl IncomingRequest {
    /// Create a request from its parts.
    #[must_use]
    pub fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        headers: HeaderLookup,
        body: impl Into<Bytes>,
    ) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            headers,
            body: body.into(),
        }
    }

    /// Build a request from `http` request parts and an already collected body.
    #[must_use]
    pub fn from_parts(parts: &http::request::Parts, body: Bytes) -> Self {
        Self::new(
            parts.method.as_str(),
            parts.uri.path(),
            HeaderLookup::from(&parts.headers),
            body,
        )
    }

    /// HTTP method token.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Request path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderLookup {
        &self.headers
    }

    /// Raw body bytes.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
