//! Turns a [`GenerationRequest`] into the provider payload.

use crate::config::GatewayConfig;
use crate::error::AtelierError;
use crate::types::{GenerationRequest, ImageInput};
use crate::wire::{Content, GenerateContentRequest, GenerationConfig, ImageConfig, Part};

/// Guidance used when a sketch is submitted without any text.
pub const DEFAULT_SKETCH_PROMPT: &str = "Turn this sketch into a high quality realistic image.";

/// A request ready for the transport: which model to call and with what body.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    pub model: String,
    pub body: GenerateContentRequest,
}

pub fn enhance_instruction(prompt: &str) -> String {
    format!(
        "Enhance the following image generation prompt to be more descriptive, artistic, and effective for high-quality image generation. Keep it under 100 words. \n\nOriginal: \"{}\"\n\nEnhanced:",
        prompt
    )
}

pub fn product_ad_instruction(background: &str, lighting: &str) -> String {
    format!(
        "Create a professional product advertisement using this product. \nBackground style: {}. \nLighting: {}. \nMake it high resolution and commercially appealing.",
        background, lighting
    )
}

pub fn edit_instruction(prompt: &str) -> String {
    format!("Edit this image: {}", prompt)
}

pub fn thumbnail_instruction(prompt: &str, layout: &str, font_style: &str) -> String {
    format!(
        "YouTube Thumbnail, {} layout, {} font style. {}",
        layout, font_style, prompt
    )
}

fn require_text(value: &str, field: &str) -> Result<(), AtelierError> {
    if value.trim().is_empty() {
        return Err(AtelierError::InvalidInput(field.to_string()));
    }
    Ok(())
}

fn require_image(image: &ImageInput, field: &str) -> Result<(), AtelierError> {
    if image.is_empty() {
        return Err(AtelierError::InvalidInput(field.to_string()));
    }
    Ok(())
}

fn image_part(image: &ImageInput) -> Part {
    Part::inline(image.mime_type(), image.data())
}

fn aspect_config(aspect_ratio: &str) -> Option<GenerationConfig> {
    Some(GenerationConfig {
        image_config: Some(ImageConfig {
            aspect_ratio: aspect_ratio.to_string(),
        }),
    })
}

/// Checks that every input the tool needs is present.
pub fn validate(request: &GenerationRequest) -> Result<(), AtelierError> {
    match request {
        GenerationRequest::PromptEnhance { prompt }
        | GenerationRequest::TextToImage { prompt, .. }
        | GenerationRequest::Thumbnail { prompt, .. } => require_text(prompt, "prompt"),
        GenerationRequest::SketchToImage { sketch, .. } => require_image(sketch, "sketch"),
        GenerationRequest::ProductAd { product, .. } => require_image(product, "product image"),
        GenerationRequest::ImageEdit { image, prompt } => {
            require_image(image, "image")?;
            require_text(prompt, "edit prompt")
        }
    }
}

/// Builds the provider payload for `request`, choosing the model from `config`.
pub fn build_request(
    request: &GenerationRequest,
    config: &GatewayConfig,
) -> Result<ProviderRequest, AtelierError> {
    validate(request)?;

    let (parts, generation_config) = match request {
        GenerationRequest::PromptEnhance { prompt } => {
            (vec![Part::text(enhance_instruction(prompt))], None)
        }
        GenerationRequest::TextToImage {
            prompt,
            aspect_ratio,
        } => (
            vec![Part::text(prompt.as_str())],
            aspect_config(aspect_ratio.as_str()),
        ),
        GenerationRequest::SketchToImage { sketch, prompt } => {
            let guidance = if prompt.trim().is_empty() {
                DEFAULT_SKETCH_PROMPT
            } else {
                prompt.as_str()
            };
            (vec![image_part(sketch), Part::text(guidance)], None)
        }
        GenerationRequest::ProductAd {
            product,
            background,
            lighting,
        } => (
            vec![
                image_part(product),
                Part::text(product_ad_instruction(background.as_str(), lighting.as_str())),
            ],
            None,
        ),
        GenerationRequest::ImageEdit { image, prompt } => (
            vec![image_part(image), Part::text(edit_instruction(prompt))],
            None,
        ),
        GenerationRequest::Thumbnail {
            prompt,
            layout,
            font_style,
            aspect_ratio,
        } => (
            vec![Part::text(thumbnail_instruction(
                prompt,
                layout.as_str(),
                font_style.as_str(),
            ))],
            aspect_config(aspect_ratio.as_str()),
        ),
    };

    let model = if request.tool().produces_text() {
        config.text_model.clone()
    } else {
        config.image_model.clone()
    };

    Ok(ProviderRequest {
        model,
        body: GenerateContentRequest {
            contents: vec![Content { parts }],
            generation_config,
        },
    })
}
