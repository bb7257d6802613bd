//! Health endpoint integration tests.

#[cfg(test)]
mod tests {
    use crate::{endpoint_url, http_client};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_report_running() {
        let resp = http_client()
            .get(format!("{}/health", endpoint_url()))
            .send()
            .await
            .expect("health request");
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        let json: serde_json::Value = resp.json().await.expect("health json");
        assert_eq!(json["status"], "running");
        assert_eq!(json["secretConfigured"], true);
    }
}
