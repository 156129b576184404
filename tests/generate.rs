mod common;

use atelier::{AspectRatio, GatewayConfig, GenerationResult, Origin};
use common::{http_gateway, image_response, png, text_response, API_KEY};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_text_to_image_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash-image:generateContent"))
        .and(header("x-goog-api-key", API_KEY))
        .and(body_json(json!({
            "contents": [{ "parts": [{ "text": "a red fox" }] }],
            "generationConfig": { "imageConfig": { "aspectRatio": "1:1" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(image_response("Zm94")))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = http_gateway(&server, GatewayConfig::default());
    let generation = gateway
        .text_to_image("a red fox", AspectRatio::Square)
        .await
        .unwrap();

    assert_eq!(generation.origin, Origin::Provider);
    assert_eq!(
        generation.result,
        GenerationResult::Image("data:image/png;base64,Zm94".into())
    );
}

#[tokio::test]
async fn test_enhance_prompt_returns_trimmed_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(text_response("  A majestic cat...\n")),
        )
        .mount(&server)
        .await;

    let gateway = http_gateway(&server, GatewayConfig::default());
    let generation = gateway.enhance_prompt("a cat").await.unwrap();

    assert_eq!(
        generation.result,
        GenerationResult::Text("A majestic cat...".into())
    );
}

#[tokio::test]
async fn test_sketch_is_sent_without_data_uri_header() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash-image:generateContent"))
        .and(body_json(json!({
            "contents": [{ "parts": [
                { "inlineData": { "mimeType": "image/png", "data": "AAAA" } },
                { "text": "a cozy cabin" }
            ] }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(image_response("Y2FiaW4=")))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = http_gateway(&server, GatewayConfig::default());
    let generation = gateway
        .sketch_to_image(png("AAAA"), "a cozy cabin")
        .await
        .unwrap();

    assert_eq!(generation.result.as_str(), "data:image/png;base64,Y2FiaW4=");
}

#[tokio::test]
async fn test_response_without_image_is_empty_not_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "I can't draw that." }] } }]
        })))
        .mount(&server)
        .await;

    let gateway = http_gateway(&server, GatewayConfig::default());
    let generation = gateway
        .text_to_image("something", AspectRatio::Portrait)
        .await
        .unwrap();

    assert_eq!(generation.result, GenerationResult::Empty);
    assert_eq!(generation.origin, Origin::Provider);
}

#[tokio::test]
async fn test_response_with_no_candidates_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "promptFeedback": {} })))
        .mount(&server)
        .await;

    let gateway = http_gateway(&server, GatewayConfig::default());
    let generation = gateway.enhance_prompt("a cat").await.unwrap();

    assert!(generation.result.is_empty());
}
