//! Mapping verification outcomes onto HTTP responses.

use hooksig_auth::VerificationOutcome;

use crate::body::WebhookResponseBody;

/// Content type for every webhook response.
pub const CONTENT_TYPE: &str = "application/json";

/// HTTP status reported for a verification outcome.
#[must_use]
pub fn outcome_status(outcome: VerificationOutcome) -> http::StatusCode {
    match outcome {
        VerificationOutcome::Verified => http::StatusCode::OK,
        VerificationOutcome::Mismatch => http::StatusCode::FORBIDDEN,
        VerificationOutcome::ConfigError => http::StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Build the response for a verification outcome.
///
/// ```json
/// {"message": "Hello, World!"}
/// {"error": "Invalid signature"}
/// {"error": "Server configuration error"}
/// ```
#[must_use]
pub fn outcome_to_response(outcome: VerificationOutcome) -> http::Response<WebhookResponseBody> {
    match outcome {
        VerificationOutcome::Verified => json_response(
            outcome_status(outcome),
            &serde_json::json!({ "message": "Hello, World!" }),
        ),
        VerificationOutcome::Mismatch => error_response(outcome_status(outcome), "Invalid signature"),
        VerificationOutcome::ConfigError => {
            error_response(outcome_status(outcome), "Server configuration error")
        }
    }
}

/// Build a JSON error response of the form `{"error": message}`.
#[must_use]
pub fn error_response(
    status: http::StatusCode,
    message: &str,
) -> http::Response<WebhookResponseBody> {
    json_response(status, &serde_json::json!({ "error": message }))
}

/// Build a JSON response with the given status.
#[must_use]
pub fn json_response(
    status: http::StatusCode,
    value: &serde_json::Value,
) -> http::Response<WebhookResponseBody> {
    let body = WebhookResponseBody::from_string(value.to_string());
    http::Response::builder()
        .status(status)
        .header("content-type", CONTENT_TYPE)
        .body(body)
        .expect("valid JSON response")
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;

    use super::*;

    async fn body_json(resp: http::Response<WebhookResponseBody>) -> serde_json::Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_should_map_outcomes_to_status_codes() {
        assert_eq!(
            outcome_status(VerificationOutcome::Verified),
            http::StatusCode::OK
        );
        assert_eq!(
            outcome_status(VerificationOutcome::Mismatch),
            http::StatusCode::FORBIDDEN
        );
        assert_eq!(
            outcome_status(VerificationOutcome::ConfigError),
            http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_should_build_verified_response() {
        let resp = outcome_to_response(VerificationOutcome::Verified);
        assert_eq!(resp.status(), http::StatusCode::OK);
        assert_eq!(resp.headers().get("content-type").unwrap(), CONTENT_TYPE);
        assert_eq!(body_json(resp).await["message"], "Hello, World!");
    }

    #[tokio::test]
    async fn test_should_build_mismatch_response() {
        let resp = outcome_to_response(VerificationOutcome::Mismatch);
        assert_eq!(resp.status(), http::StatusCode::FORBIDDEN);
        assert_eq!(body_json(resp).await["error"], "Invalid signature");
    }

    #[tokio::test]
    async fn test_should_build_config_error_response() {
        let resp = outcome_to_response(VerificationOutcome::ConfigError);
        assert_eq!(resp.status(), http::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(resp).await["error"], "Server configuration error");
    }
}
