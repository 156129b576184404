use crate::builder::build_request;
use crate::config::{FallbackPolicy, GatewayConfig};
use crate::credential::CredentialStore;
use crate::error::AtelierError;
use crate::placeholder::placeholder_for;
use crate::transport::{HttpTransport, Transport};
use crate::types::{
    AspectRatio, BackgroundStyle, FontStyle, Generation, GenerationRequest, GenerationResult,
    ImageInput, Lighting, ThumbnailLayout, ToolKind,
};
use crate::wire::GenerateContentResponse;
use std::fmt;
use std::sync::Arc;

/// The single entry point for every tool's remote call.
///
/// Each call resolves the credential, builds the provider payload, invokes
/// the transport and extracts the result. Failures other than a missing
/// credential or invalid input are handled according to the configured
/// [`FallbackPolicy`].
#[derive(Clone)]
pub struct Gateway {
    config: Arc<GatewayConfig>,
    credentials: Arc<CredentialStore>,
    transport: Arc<dyn Transport>,
}

impl Gateway {
    /// Creates a gateway that talks HTTP to `config.base_url`.
    pub fn new(
        config: GatewayConfig,
        credentials: Arc<CredentialStore>,
    ) -> Result<Self, AtelierError> {
        let transport = HttpTransport::new_with_url(&config.base_url)?;
        Ok(Self::with_transport(config, credentials, Arc::new(transport)))
    }

    pub fn with_transport(
        config: GatewayConfig,
        credentials: Arc<CredentialStore>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            credentials,
            transport,
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn credentials(&self) -> &Arc<CredentialStore> {
        &self.credentials
    }

    /// Runs one generation.
    ///
    /// # Errors
    ///
    /// - `AtelierError::MissingCredential` if no credential is configured. No
    ///   request is built or sent.
    /// - `AtelierError::InvalidInput` if a required input is blank.
    /// - Any remote failure, but only under [`FallbackPolicy::Surface`].
    pub async fn generate(&self, request: &GenerationRequest) -> Result<Generation, AtelierError> {
        let tool = request.tool();
        let api_key = self.credentials.get_credential();
        if api_key.is_empty() {
            tracing::info!(tool = tool.slug(), "no API key configured, prompting for settings");
            return Err(AtelierError::MissingCredential);
        }

        let provider_request = build_request(request, &self.config)?;
        tracing::debug!(
            tool = tool.slug(),
            model = %provider_request.model,
            "dispatching generation"
        );

        match self
            .transport
            .generate_content(&provider_request.model, &api_key, &provider_request.body)
            .await
        {
            Ok(response) => {
                let result = extract_result(tool, &response);
                if result.is_empty() {
                    tracing::info!(tool = tool.slug(), outcome = "empty_result", "provider returned nothing");
                }
                Ok(Generation::provider(result))
            }
            Err(e) => self.recover(request, e),
        }
    }

    fn recover(
        &self,
        request: &GenerationRequest,
        error: AtelierError,
    ) -> Result<Generation, AtelierError> {
        let tool = request.tool().slug();
        match self.config.fallback {
            FallbackPolicy::Surface => {
                tracing::warn!(tool, outcome = "remote_call_failure", error = %error, "generation failed");
                Err(error)
            }
            FallbackPolicy::Placeholder => {
                tracing::warn!(
                    tool,
                    outcome = "placeholder_substitution",
                    error = %error,
                    "generation failed, substituting placeholder"
                );
                Ok(Generation::placeholder(placeholder_for(request)))
            }
        }
    }

    pub async fn enhance_prompt(&self, prompt: &str) -> Result<Generation, AtelierError> {
        self.generate(&GenerationRequest::PromptEnhance {
            prompt: prompt.to_string(),
        })
        .await
    }

    pub async fn text_to_image(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
    ) -> Result<Generation, AtelierError> {
        self.generate(&GenerationRequest::TextToImage {
            prompt: prompt.to_string(),
            aspect_ratio,
        })
        .await
    }

    pub async fn sketch_to_image(
        &self,
        sketch: ImageInput,
        prompt: &str,
    ) -> Result<Generation, AtelierError> {
        self.generate(&GenerationRequest::SketchToImage {
            sketch,
            prompt: prompt.to_string(),
        })
        .await
    }

    pub async fn product_ad(
        &self,
        product: ImageInput,
        background: BackgroundStyle,
        lighting: Lighting,
    ) -> Result<Generation, AtelierError> {
        self.generate(&GenerationRequest::ProductAd {
            product,
            background,
            lighting,
        })
        .await
    }

    pub async fn edit_image(
        &self,
        image: ImageInput,
        prompt: &str,
    ) -> Result<Generation, AtelierError> {
        self.generate(&GenerationRequest::ImageEdit {
            image,
            prompt: prompt.to_string(),
        })
        .await
    }

    pub async fn thumbnail(
        &self,
        prompt: &str,
        layout: ThumbnailLayout,
        font_style: FontStyle,
        aspect_ratio: AspectRatio,
    ) -> Result<Generation, AtelierError> {
        self.generate(&GenerationRequest::Thumbnail {
            prompt: prompt.to_string(),
            layout,
            font_style,
            aspect_ratio,
        })
        .await
    }
}

impl fmt::Debug for Gateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gateway")
            .field("config", &self.config)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

/// Pulls the tool's result out of a provider response.
///
/// Image tools take the first inline-data part and re-wrap it as a PNG data
/// URI; the prompt enhancer takes the trimmed text.
pub fn extract_result(tool: ToolKind, response: &GenerateContentResponse) -> GenerationResult {
    if tool.produces_text() {
        return match response.text() {
            Some(text) if !text.trim().is_empty() => GenerationResult::Text(text.trim().to_string()),
            _ => GenerationResult::Empty,
        };
    }
    match response.first_inline_data() {
        Some(inline) => GenerationResult::Image(format!("data:image/png;base64,{}", inline.data)),
        None => GenerationResult::Empty,
    }
}
