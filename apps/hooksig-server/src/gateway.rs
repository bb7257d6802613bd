//! Gateway service in front of the webhook endpoint.
//!
//! Health-check probes (`/health`, `/_health`) are answered here; every other
//! request is handed to the [`WebhookHttpService`].

use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

use hooksig_http::{WebhookHttpService, WebhookResponseBody};
use hyper::service::Service;

/// Gateway routing health probes and webhook deliveries.
#[derive(Debug, Clone)]
pub struct GatewayService {
    webhook: WebhookHttpService,
    secret_configured: bool,
}

impl GatewayService {
    /// Create a new gateway wrapping the webhook service.
    pub fn new(webhook: WebhookHttpService, secret_configured: bool) -> Self {
        Self {
            webhook,
            secret_configured,
        }
    }
}

impl<B> Service<http::Request<B>> for GatewayService
where
    B: hyper::body::Body + Send + 'static,
    B::Data: Send,
    B::Error: fmt::Display + Send,
{
    type Response = http::Response<WebhookResponseBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<B>) -> Self::Future {
        if is_health_check(req.method(), req.uri().path()) {
            let resp = health_check_response(self.secret_configured);
            return Box::pin(async { Ok(resp) });
        }

        self.webhook.call(req)
    }
}

/// Check if the request is a health check probe.
fn is_health_check(method: &http::Method, path: &str) -> bool {
    *method == http::Method::GET && (path == "/health" || path == "/_health")
}

/// Produce the health check response.
fn health_check_response(secret_configured: bool) -> http::Response<WebhookResponseBody> {
    let body = serde_json::json!({
        "status": "running",
        "secretConfigured": secret_configured,
    });
    http::Response::builder()
        .status(http::StatusCode::OK)
        .header("Content-Type", "application/json")
        .body(WebhookResponseBody::from_string(body.to_string()))
        .expect("static health response should be valid")
}
