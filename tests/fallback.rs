mod common;

use atelier::placeholder::seed;
use atelier::{AspectRatio, AtelierError, FallbackPolicy, GatewayConfig, GenerationResult, Origin};
use common::{http_gateway, one_of_each, spy_gateway, SpyTransport, API_KEY};
use serde_json::json;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_remote_failure_substitutes_placeholder() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "error": { "code": 503, "message": "The model is overloaded." }
        })))
        .mount(&server)
        .await;

    let gateway = http_gateway(&server, GatewayConfig::default());
    let generation = gateway
        .text_to_image("a red fox", AspectRatio::Square)
        .await
        .unwrap();

    assert!(generation.is_placeholder());
    assert_eq!(
        generation.result,
        GenerationResult::Image(format!(
            "https://picsum.photos/seed/{}/1024/1024",
            seed("text_to_image", "a red fox")
        ))
    );
}

#[tokio::test]
async fn test_placeholder_is_deterministic() {
    let spy = SpyTransport::failing(500);
    let gateway = spy_gateway(API_KEY, GatewayConfig::default(), spy.clone());

    let first = gateway.enhance_prompt("a cat").await.unwrap();
    let second = gateway.enhance_prompt("a cat").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.origin, Origin::Placeholder);
    assert_eq!(
        first.result,
        GenerationResult::Text("Enhanced version of: a cat (Simulation: Error)".into())
    );
    assert_eq!(spy.calls(), 2);
}

#[tokio::test]
async fn test_every_tool_falls_back_on_failure() {
    let spy = SpyTransport::failing(429);
    let gateway = spy_gateway(API_KEY, GatewayConfig::default(), spy.clone());

    for request in one_of_each() {
        let generation = gateway.generate(&request).await.unwrap();
        assert!(generation.is_placeholder(), "{:?}", request.tool());
        assert!(!generation.result.is_empty());
    }
    assert_eq!(spy.calls(), 6);
}

#[tokio::test]
async fn test_surface_policy_returns_the_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "code": 400, "message": "API key not valid." }
        })))
        .mount(&server)
        .await;

    let config = GatewayConfig::default().with_fallback(FallbackPolicy::Surface);
    let gateway = http_gateway(&server, config);
    let err = gateway
        .text_to_image("a red fox", AspectRatio::Square)
        .await
        .unwrap_err();

    match err {
        AtelierError::ApiError { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "API key not valid.");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_counts_as_remote_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway timeout</html>"))
        .mount(&server)
        .await;

    let config = GatewayConfig::default().with_fallback(FallbackPolicy::Surface);
    let gateway = http_gateway(&server, config);
    let err = gateway.enhance_prompt("a cat").await.unwrap_err();

    assert!(matches!(err, AtelierError::ResponseParseFailed(_)));
}

#[tokio::test]
async fn test_invalid_input_is_not_replaced_by_placeholder() {
    let spy = SpyTransport::failing(500);
    let gateway = spy_gateway(API_KEY, GatewayConfig::default(), spy.clone());

    let err = gateway
        .text_to_image("   ", AspectRatio::Square)
        .await
        .unwrap_err();

    assert!(matches!(err, AtelierError::InvalidInput(_)));
    assert_eq!(spy.calls(), 0);
}
