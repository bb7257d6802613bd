//! Webhook HTTP service implementing the hyper `Service` trait.

use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::BodyExt;
use tracing::{debug, error, info};

use hooksig_auth::{
    IncomingRequest, SIGNATURE_HEADER, SIGNED_HEADERS_HEADER, VerificationOutcome, WebhookVerifier,
};

use crate::body::WebhookResponseBody;
use crate::response::{error_response, outcome_to_response};

/// Configuration for the webhook HTTP service.
#[derive(Debug, Clone)]
pub struct WebhookHttpConfig {
    /// Header carrying the sender's digest (lowercase).
    pub signature_header: String,
    /// Header carrying the signed-headers directive (lowercase).
    pub signed_headers_header: String,
    /// Path that accepts deliveries.
    pub webhook_path: String,
}

impl Default for WebhookHttpConfig {
    fn default() -> Self {
        Self {
            signature_header: SIGNATURE_HEADER.to_owned(),
            signed_headers_header: SIGNED_HEADERS_HEADER.to_owned(),
            webhook_path: "/".to_owned(),
        }
    }
}

/// Hyper `Service` that authenticates webhook deliveries.
///
/// Wraps a shared [`WebhookVerifier`] and turns each verification outcome
/// into an HTTP response.
#[derive(Debug, Clone)]
pub struct WebhookHttpService {
    verifier: Arc<WebhookVerifier>,
    config: Arc<WebhookHttpConfig>,
}

impl WebhookHttpService {
    /// Create a new `WebhookHttpService`.
    pub fn new(verifier: Arc<WebhookVerifier>, config: WebhookHttpConfig) -> Self {
        Self {
            verifier,
            config: Arc::new(config),
        }
    }

    /// The path this service accepts deliveries on.
    #[must_use]
    pub fn webhook_path(&self) -> &str {
        &self.config.webhook_path
    }
}

impl<B> hyper::service::Service<http::Request<B>> for WebhookHttpService
where
    B: http_body::Body + Send + 'static,
    B::Data: Send,
    B::Error: fmt::Display + Send,
{
    type Response = http::Response<WebhookResponseBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<B>) -> Self::Future {
        let verifier = Arc::clone(&self.verifier);
        let config = Arc::clone(&self.config);
        let request_id = uuid::Uuid::new_v4().to_string();

        Box::pin(async move {
            let response = process_request(req, &verifier, &config, &request_id).await;
            let response = add_common_headers(response, &request_id);
            Ok(response)
        })
    }
}

/// Process a single delivery through the full pipeline.
async fn process_request<B>(
    req: http::Request<B>,
    verifier: &WebhookVerifier,
    config: &WebhookHttpConfig,
    request_id: &str,
) -> http::Response<WebhookResponseBody>
where
    B: http_body::Body,
    B::Error: fmt::Display,
{
    let (parts, incoming) = req.into_parts();

    // 1. Route: only the configured path, only POST.
    if parts.uri.path() != config.webhook_path {
        return error_response(http::StatusCode::NOT_FOUND, "Not found");
    }
    if parts.method != http::Method::POST {
        let mut resp =
            error_response(http::StatusCode::METHOD_NOT_ALLOWED, "Method not allowed");
        resp.headers_mut()
            .insert(http::header::ALLOW, http::HeaderValue::from_static("POST"));
        return resp;
    }

    // 2. Collect body.
    let body = match collect_body(incoming).await {
        Ok(body) => body,
        Err(message) => {
            error!(request_id = %request_id, error = %message, "Failed to read request body");
            return error_response(http::StatusCode::INTERNAL_SERVER_ERROR, "Failed to read body");
        }
    };

    // 3. Extract the sender's digest and directive.
    let Some(provided) = header_text(&parts.headers, &config.signature_header) else {
        debug!(request_id = %request_id, "Delivery without signature header");
        return error_response(http::StatusCode::BAD_REQUEST, "Signature missing");
    };
    let directive = header_text(&parts.headers, &config.signed_headers_header).unwrap_or_default();

    // 4. Verify.
    let request = IncomingRequest::from_parts(&parts, body);
    let outcome = verifier.verify(&request, &directive, &provided);

    match outcome {
        VerificationOutcome::Verified => {
            info!(request_id = %request_id, outcome = %outcome, "Webhook delivery accepted");
        }
        VerificationOutcome::Mismatch => {
            info!(request_id = %request_id, outcome = %outcome, "Webhook delivery rejected");
        }
        VerificationOutcome::ConfigError => {
            error!(
                request_id = %request_id,
                outcome = %outcome,
                "Cannot verify webhook delivery: signing secret is not configured"
            );
        }
    }

    outcome_to_response(outcome)
}

/// Collect the incoming body into a single `Bytes` buffer.
async fn collect_body<B>(incoming: B) -> Result<Bytes, String>
where
    B: http_body::Body,
    B::Error: fmt::Display,
{
    incoming
        .collect()
        .await
        .map(http_body_util::Collected::to_bytes)
        .map_err(|e| e.to_string())
}

/// Read a header as text. Invalid UTF-8 is replaced rather than rejected.
fn header_text(headers: &http::HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
}

/// Add common response headers to every webhook response.
fn add_common_headers(
    mut response: http::Response<WebhookResponseBody>,
    request_id: &str,
) -> http::Response<WebhookResponseBody> {
    let headers = response.headers_mut();

    if let Ok(hv) = http::HeaderValue::from_str(request_id) {
        headers.entry("x-request-id").or_insert(hv);
    }

    headers.insert("server", http::HeaderValue::from_static("hooksig"));

    response
}
