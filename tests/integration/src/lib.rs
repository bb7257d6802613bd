//! Integration tests for the hooksig server.
//!
//! These tests require a running hooksig server at `localhost:8080` started
//! with `CONTENTFUL_SIGNING_SECRET` set to the same value as
//! `HOOKSIG_TEST_SECRET` (default `testsecret`). They are marked `#[ignore]`
//! so they don't run during normal `cargo test`.
//!
//! Run them with:
//! ```text
//! cargo test -p hooksig-integration -- --ignored
//! ```

use std::sync::Once;

use anyhow::Context;
use bytes::Bytes;
use hooksig_auth::{
    Digest, HeaderLookup, IncomingRequest, SIGNATURE_HEADER, SIGNED_HEADERS_HEADER, Secret,
    sign_request,
};

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Endpoint URL for the server.
#[must_use]
pub fn endpoint_url() -> String {
    std::env::var("HOOKSIG_ENDPOINT_URL").unwrap_or_else(|_| "http://localhost:8080".to_owned())
}

/// The secret the server under test was started with.
#[must_use]
pub fn signing_secret() -> Secret {
    let secret =
        std::env::var("HOOKSIG_TEST_SECRET").unwrap_or_else(|_| "testsecret".to_owned());
    Secret::from(secret)
}

/// Create an HTTP client for the server under test.
#[must_use]
pub fn http_client() -> reqwest::Client {
    init_tracing();
    reqwest::Client::new()
}

/// A webhook delivery ready to be sent.
#[derive(Debug, Clone)]
pub struct Delivery {
    /// Headers to send, in order.
    pub headers: Vec<(String, String)>,
    /// Raw body.
    pub body: Bytes,
}

impl Delivery {
    /// Build a delivery for `POST /` signed with `secret` over `directive`.
    #[must_use]
    pub fn signed(
        headers: &[(&str, &str)],
        directive: &str,
        body: &[u8],
        secret: &Secret,
    ) -> Self {
        let body = Bytes::copy_from_slice(body);
        let lookup: HeaderLookup = headers.iter().map(|(k, v)| (*k, *v)).collect();
        let request = IncomingRequest::new("POST", "/", lookup, body.clone());
        let signature = sign_request(&request, directive, secret);
        Self::with_signature(headers, directive, body, &signature)
    }

    /// Build a delivery carrying an explicit signature.
    #[must_use]
    pub fn with_signature(
        headers: &[(&str, &str)],
        directive: &str,
        body: Bytes,
        signature: &Digest,
    ) -> Self {
        let mut all: Vec<(String, String)> = headers
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        all.push((SIGNED_HEADERS_HEADER.to_owned(), directive.to_owned()));
        all.push((SIGNATURE_HEADER.to_owned(), signature.to_string()));
        Self { headers: all, body }
    }

    /// Send the delivery to the server under test.
    pub async fn send(&self, client: &reqwest::Client) -> anyhow::Result<reqwest::Response> {
        let mut req = client.post(format!("{}/", endpoint_url()));
        for (name, value) in &self.headers {
            req = req.header(name.as_str(), value.as_str());
        }
        req.body(self.body.clone())
            .send()
            .await
            .context("failed to send webhook delivery")
    }
}

mod test_health;
mod test_webhook;
