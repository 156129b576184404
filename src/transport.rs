use crate::config::DEFAULT_BASE_URL;
use crate::error::AtelierError;
use crate::wire::{GenerateContentRequest, GenerateContentResponse};
use async_trait::async_trait;
use url::Url;

/// The remote `generateContent` call, abstracted so the gateway can be driven
/// by an HTTP client in production and by fakes in tests.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn generate_content(
        &self,
        model: &str,
        api_key: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, AtelierError>;
}

/// HTTP transport for the Gemini REST API.
///
/// It holds a shared `reqwest::Client` and the base URL for all requests, and
/// is cheap to clone. The API key is sent per request, never stored here.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    /// Creates a transport pointed at the public Gemini endpoint.
    pub fn new() -> Result<Self, AtelierError> {
        Self::new_with_url(DEFAULT_BASE_URL)
    }

    /// Creates a transport with a custom base URL, e.g. a mock server.
    ///
    /// # Errors
    ///
    /// - `AtelierError::RequestFailed` if the internal HTTP client fails to build.
    /// - `AtelierError::UrlParseFailed` if `base_url` is invalid.
    pub fn new_with_url(base_url: &str) -> Result<Self, AtelierError> {
        let client = reqwest::Client::builder().build()?;

        // `Url::join` drops the last segment unless the base ends with a slash.
        let base_url = if base_url.ends_with('/') {
            Url::parse(base_url)?
        } else {
            Url::parse(&format!("{}/", base_url))?
        };

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

fn error_message(body: &serde_json::Value) -> String {
    body.pointer("/error/message")
        .and_then(|m| m.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl Transport for HttpTransport {
    async fn generate_content(
        &self,
        model: &str,
        api_key: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, AtelierError> {
        let url = self
            .base_url
            .join(&format!("models/{}:generateContent", model))?;

        tracing::debug!(%model, "sending generateContent request");
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let bytes = response.bytes().await?;
            Ok(serde_json::from_slice(&bytes)?)
        } else {
            let error_response: serde_json::Value = response.json().await.unwrap_or_default();
            Err(AtelierError::ApiError {
                status: status.as_u16(),
                message: error_message(&error_response),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn base_url_gets_trailing_slash() {
        let transport = HttpTransport::new_with_url("http://localhost:1234/v1beta").unwrap();
        assert_eq!(transport.base_url().as_str(), "http://localhost:1234/v1beta/");
    }

    #[test]
    fn extracts_provider_error_message() {
        let body = json!({ "error": { "code": 400, "message": "API key not valid." } });
        assert_eq!(error_message(&body), "API key not valid.");
        assert_eq!(error_message(&json!(null)), "null");
    }
}
