//! Webhook HTTP service layer for hooksig.
//!
//! This crate adapts [`hooksig_auth`] to HTTP:
//!
//! - **Service**: Hyper `Service` that routes, collects the body and verifies
//! - **Response helpers**: outcome to status code and JSON body mapping
//! - **Body**: buffered response body type

pub mod body;
pub mod response;
pub mod service;

pub use body::WebhookResponseBody;
pub use response::{outcome_status, outcome_to_response};
pub use service::{WebhookHttpConfig, WebhookHttpService};
