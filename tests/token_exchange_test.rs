use gcp_token_issuer::exchange::TokenExchange;
use gcp_token_issuer::{AccessToken, AuthError, IssuerConfig, TokenExchangeClient, TokenExchangeResult};

fn client_for(server: &mockito::Server) -> (TokenExchangeClient, reqwest::Url) {
    let config = IssuerConfig::builder()
        .token_endpoint(format!("{}/token", server.url()))
        .build();
    let client = TokenExchangeClient::from_config(&config).expect("client");
    let endpoint = client.endpoint().clone();
    (client, endpoint)
}

#[tokio::test]
async fn posts_form_encoded_jwt_bearer_grant() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("POST", "/token")
        .match_header(
            "content-type",
            mockito::Matcher::Regex("^application/x-www-form-urlencoded".into()),
        )
        .match_body(mockito::Matcher::AllOf(vec![
            mockito::Matcher::Regex(
                "grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer".into(),
            ),
            mockito::Matcher::Regex("assertion=aaa.bbb.ccc".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token":"ya29.abc","token_type":"Bearer","expires_in":3599}"#)
        .expect(1)
        .create_async()
        .await;

    let (client, endpoint) = client_for(&server);
    let result = client.exchange("aaa.bbb.ccc", &endpoint).await;

    assert_eq!(
        result,
        TokenExchangeResult::Success(AccessToken {
            access_token: "ya29.abc".to_string(),
            token_type: Some("Bearer".to_string()),
            expires_in: Some(3599),
        })
    );
    _m.assert_async().await;
}

#[tokio::test]
async fn endpoint_error_description_becomes_failure_reason() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("POST", "/token")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":"invalid_grant","error_description":"bad assertion"}"#)
        .create_async()
        .await;

    let (client, endpoint) = client_for(&server);
    let result = client.exchange("aaa.bbb.ccc", &endpoint).await;
    assert_eq!(result, TokenExchangeResult::failure("bad assertion"));
}

#[tokio::test]
async fn error_code_alone_becomes_failure_reason() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("POST", "/token")
        .with_status(401)
        .with_body(r#"{"error":"invalid_client"}"#)
        .create_async()
        .await;

    let (client, endpoint) = client_for(&server);
    let result = client.try_exchange("aaa.bbb.ccc", &endpoint).await;
    assert_eq!(result, Err(AuthError::token_endpoint("invalid_client")));
}

#[tokio::test]
async fn non_json_body_is_unexpected_format() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("POST", "/token")
        .with_status(502)
        .with_header("content-type", "text/html")
        .with_body("<html><body>Bad Gateway</body></html>")
        .create_async()
        .await;

    let (client, endpoint) = client_for(&server);
    let result = client.exchange("aaa.bbb.ccc", &endpoint).await;
    assert_eq!(result, TokenExchangeResult::failure("unexpected response format"));
}

#[tokio::test]
async fn trait_object_uses_configured_endpoint() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("POST", "/token")
        .with_status(200)
        .with_body(r#"{"access_token":"via-trait"}"#)
        .expect(1)
        .create_async()
        .await;

    let (client, _) = client_for(&server);
    let exchange: &dyn TokenExchange = &client;
    let token = exchange.request_token("aaa.bbb.ccc").await.expect("token");
    assert_eq!(token, AccessToken::new("via-trait"));
    _m.assert_async().await;
}

#[tokio::test]
async fn unreachable_endpoint_is_network_error() {
    // Port 9 (discard) on localhost is expected to refuse connections.
    let config = IssuerConfig::builder()
        .token_endpoint("http://127.0.0.1:9/token")
        .build();
    let client = TokenExchangeClient::from_config(&config).expect("client");
    let result = client.try_exchange("aaa.bbb.ccc", client.endpoint()).await;

    let err = result.expect_err("connection should fail");
    assert!(matches!(err, AuthError::Network(_)), "{err:?}");
    let reason = err.to_string();
    assert!(reason.starts_with("network error: "));
    assert_ne!(reason, "network error: error sending request");
    assert!(
        reason.to_lowercase().contains("connect"),
        "reason should name the connect failure: {reason}"
    );
    assert!(err.is_retryable());
}
