#![allow(dead_code)]

use async_trait::async_trait;
use atelier::wire::{GenerateContentRequest, GenerateContentResponse};
use atelier::{
    AspectRatio, AtelierError, BackgroundStyle, CredentialStore, FontStyle, Gateway,
    GatewayConfig, GenerationRequest, ImageInput, Lighting, ThumbnailLayout, Transport,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use wiremock::MockServer;

pub const API_KEY: &str = "test_api_key";

/// A transport that records every call and answers with a canned response.
pub struct SpyTransport {
    calls: AtomicUsize,
    last: Mutex<Option<(String, String, GenerateContentRequest)>>,
    reply: Box<dyn Fn() -> Result<GenerateContentResponse, AtelierError> + Send + Sync>,
}

impl SpyTransport {
    pub fn replying(body: Value) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
            reply: Box::new(move || Ok(serde_json::from_value(body.clone()).unwrap())),
        })
    }

    pub fn failing(status: u16) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
            reply: Box::new(move || {
                Err(AtelierError::ApiError {
                    status,
                    message: "simulated failure".into(),
                })
            }),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The (model, api_key, body) of the most recent call.
    pub fn last_call(&self) -> Option<(String, String, GenerateContentRequest)> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for SpyTransport {
    async fn generate_content(
        &self,
        model: &str,
        api_key: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, AtelierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some((model.to_string(), api_key.to_string(), body.clone()));
        (self.reply)()
    }
}

pub fn credentials(key: &str) -> Arc<CredentialStore> {
    let store = Arc::new(CredentialStore::in_memory());
    store.set_credential(key);
    store
}

pub fn spy_gateway(
    key: &str,
    config: GatewayConfig,
    transport: Arc<SpyTransport>,
) -> Gateway {
    Gateway::with_transport(config, credentials(key), transport)
}

pub fn http_gateway(server: &MockServer, config: GatewayConfig) -> Gateway {
    Gateway::new(config.with_base_url(server.uri()), credentials(API_KEY)).unwrap()
}

pub fn image_response(data: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "parts": [{ "inlineData": { "mimeType": "image/png", "data": data } }] },
            "finishReason": "STOP"
        }]
    })
}

pub fn text_response(text: &str) -> Value {
    json!({
        "candidates": [{ "content": { "parts": [{ "text": text }] } }]
    })
}

pub fn png(data: &str) -> ImageInput {
    ImageInput::from_data_uri(&format!("data:image/png;base64,{}", data)).unwrap()
}

/// One valid request for each of the six tools.
pub fn one_of_each() -> Vec<GenerationRequest> {
    vec![
        GenerationRequest::PromptEnhance {
            prompt: "a cat".into(),
        },
        GenerationRequest::TextToImage {
            prompt: "a red fox".into(),
            aspect_ratio: AspectRatio::Square,
        },
        GenerationRequest::SketchToImage {
            sketch: png("AAAA"),
            prompt: String::new(),
        },
        GenerationRequest::ProductAd {
            product: png("AAAA"),
            background: BackgroundStyle::Outdoor,
            lighting: Lighting::Soft,
        },
        GenerationRequest::ImageEdit {
            image: png("AAAA"),
            prompt: "make it snow".into(),
        },
        GenerationRequest::Thumbnail {
            prompt: "Unboxing".into(),
            layout: ThumbnailLayout::TextOverImage,
            font_style: FontStyle::Futuristic,
            aspect_ratio: AspectRatio::Landscape,
        },
    ]
}
