//! Webhook delivery integration tests.

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use hooksig_auth::{HeaderLookup, IncomingRequest, Secret, sign_request};

    use crate::{Delivery, endpoint_url, http_client, signing_secret};

    const JSON: &[(&str, &str)] = &[
        ("content-type", "application/json"),
        ("x-contentful-topic", "ContentManagement.Entry.publish"),
    ];

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_accept_signed_delivery() {
        let client = http_client();
        let body = format!(r#"{{"sys":{{"id":"{}"}}}}"#, uuid::Uuid::new_v4());
        let delivery = Delivery::signed(
            JSON,
            "content-type,x-contentful-topic",
            body.as_bytes(),
            &signing_secret(),
        );

        let resp = delivery.send(&client).await.expect("send");
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        assert!(resp.headers().get("x-request-id").is_some());

        let json: serde_json::Value = resp.json().await.expect("json body");
        assert_eq!(json["message"], "Hello, World!");
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_delivery_signed_with_wrong_secret() {
        let client = http_client();
        let delivery = Delivery::signed(JSON, "content-type", b"{}", &Secret::from("wrong"));

        let resp = delivery.send(&client).await.expect("send");
        assert_eq!(resp.status(), reqwest::StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_tampered_body() {
        let client = http_client();
        let mut delivery = Delivery::signed(JSON, "content-type", b"{\"a\":1}", &signing_secret());
        delivery.body = Bytes::from_static(b"{\"a\":2}");

        let resp = delivery.send(&client).await.expect("send");
        assert_eq!(resp.status(), reqwest::StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_accept_directive_naming_absent_header() {
        let client = http_client();
        let lookup: HeaderLookup = JSON.iter().map(|(k, v)| (*k, *v)).collect();
        let request = IncomingRequest::new("POST", "/", lookup, Bytes::from_static(b"{}"));
        let signature = sign_request(&request, "content-type,x-not-sent", &signing_secret());
        let delivery = Delivery::with_signature(
            JSON,
            "content-type,x-not-sent",
            Bytes::from_static(b"{}"),
            &signature,
        );

        let resp = delivery.send(&client).await.expect("send");
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_missing_signature() {
        let resp = http_client()
            .post(format!("{}/", endpoint_url()))
            .header("content-type", "application/json")
            .body("{}")
            .send()
            .await
            .expect("send");
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
    }
}
