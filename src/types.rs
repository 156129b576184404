use crate::error::AtelierError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

static DATA_URI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^data:(image/[\w.+-]+);base64,").expect("static regex"));

/// The output aspect ratios accepted by the image model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "16:9")]
    Landscape,
    #[serde(rename = "9:16")]
    Portrait,
    #[serde(rename = "4:3")]
    FourThree,
    #[serde(rename = "3:4")]
    ThreeFour,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 5] = [
        AspectRatio::Square,
        AspectRatio::Landscape,
        AspectRatio::Portrait,
        AspectRatio::FourThree,
        AspectRatio::ThreeFour,
    ];

    /// The exact string the provider expects.
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Landscape => "16:9",
            AspectRatio::Portrait => "9:16",
            AspectRatio::FourThree => "4:3",
            AspectRatio::ThreeFour => "3:4",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = AtelierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AspectRatio::ALL
            .into_iter()
            .find(|r| r.as_str() == s.trim())
            .ok_or_else(|| AtelierError::InvalidInput(format!("unsupported aspect ratio '{}'", s)))
    }
}

/// Background style for product advertisements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BackgroundStyle {
    #[default]
    Studio,
    Outdoor,
    Gradient,
}

impl BackgroundStyle {
    pub const ALL: [BackgroundStyle; 3] = [
        BackgroundStyle::Studio,
        BackgroundStyle::Outdoor,
        BackgroundStyle::Gradient,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BackgroundStyle::Studio => "Studio",
            BackgroundStyle::Outdoor => "Outdoor",
            BackgroundStyle::Gradient => "Gradient",
        }
    }
}

impl fmt::Display for BackgroundStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lighting setup for product advertisements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Lighting {
    #[default]
    Bright,
    Dramatic,
    Soft,
}

impl Lighting {
    pub const ALL: [Lighting; 3] = [Lighting::Bright, Lighting::Dramatic, Lighting::Soft];

    pub fn as_str(&self) -> &'static str {
        match self {
            Lighting::Bright => "Bright",
            Lighting::Dramatic => "Dramatic",
            Lighting::Soft => "Soft",
        }
    }
}

impl fmt::Display for Lighting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How text and imagery are arranged in a thumbnail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ThumbnailLayout {
    #[default]
    #[serde(rename = "Text Over Image")]
    TextOverImage,
    #[serde(rename = "Split Screen")]
    SplitScreen,
    #[serde(rename = "Image Only")]
    ImageOnly,
}

impl ThumbnailLayout {
    pub const ALL: [ThumbnailLayout; 3] = [
        ThumbnailLayout::TextOverImage,
        ThumbnailLayout::SplitScreen,
        ThumbnailLayout::ImageOnly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThumbnailLayout::TextOverImage => "Text Over Image",
            ThumbnailLayout::SplitScreen => "Split Screen",
            ThumbnailLayout::ImageOnly => "Image Only",
        }
    }
}

impl fmt::Display for ThumbnailLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Font style hint for thumbnail text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FontStyle {
    #[default]
    Futuristic,
    #[serde(rename = "Bold & Modern")]
    BoldModern,
    Handwritten,
    Minimalist,
}

impl FontStyle {
    pub const ALL: [FontStyle; 4] = [
        FontStyle::Futuristic,
        FontStyle::BoldModern,
        FontStyle::Handwritten,
        FontStyle::Minimalist,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FontStyle::Futuristic => "Futuristic",
            FontStyle::BoldModern => "Bold & Modern",
            FontStyle::Handwritten => "Handwritten",
            FontStyle::Minimalist => "Minimalist",
        }
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An uploaded image, held as base64 data plus its declared MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    mime_type: String,
    data: String,
}

impl ImageInput {
    /// MIME type assumed for bare base64 input without a data-URI header.
    pub const DEFAULT_MIME_TYPE: &'static str = "image/png";

    /// Parses a `data:image/<type>;base64,<data>` URI.
    ///
    /// A string without any `data:` prefix must be bare base64; it is tagged
    /// with [`Self::DEFAULT_MIME_TYPE`].
    pub fn from_data_uri(uri: &str) -> Result<Self, AtelierError> {
        let uri = uri.trim();
        if let Some(caps) = DATA_URI_RE.captures(uri) {
            let header_len = caps.get(0).map(|m| m.end()).unwrap_or(0);
            let mime_type = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            return Ok(Self {
                mime_type: mime_type.to_string(),
                data: uri[header_len..].to_string(),
            });
        }
        if uri.starts_with("data:") {
            let header: String = uri.chars().take_while(|c| *c != ',').take(64).collect();
            return Err(AtelierError::InvalidDataUri(header));
        }
        if STANDARD.decode(uri).is_err() {
            return Err(AtelierError::InvalidDataUri(
                "input is neither a data URI nor base64".to_string(),
            ));
        }
        Ok(Self {
            mime_type: Self::DEFAULT_MIME_TYPE.to_string(),
            data: uri.to_string(),
        })
    }

    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: STANDARD.encode(bytes),
        }
    }

    /// Reads a local image file, guessing the MIME type from its extension.
    pub async fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, AtelierError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let mime_type = mime_guess::from_path(path)
            .first()
            .filter(|m| m.type_() == mime_guess::mime::IMAGE)
            .map(|m| m.essence_str().to_string())
            .unwrap_or_else(|| Self::DEFAULT_MIME_TYPE.to_string());
        Ok(Self::from_bytes(&bytes, mime_type))
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// The base64 payload, without any header.
    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

impl FromStr for ImageInput {
    type Err = AtelierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_data_uri(s)
    }
}

/// The six creative tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    PromptEnhancer,
    TextToImage,
    SketchToImage,
    ProductAd,
    ImageEditor,
    Thumbnail,
}

impl ToolKind {
    pub const ALL: [ToolKind; 6] = [
        ToolKind::PromptEnhancer,
        ToolKind::TextToImage,
        ToolKind::SketchToImage,
        ToolKind::ProductAd,
        ToolKind::ImageEditor,
        ToolKind::Thumbnail,
    ];

    /// Navigation label.
    pub fn label(&self) -> &'static str {
        match self {
            ToolKind::PromptEnhancer => "Prompt Enhancer",
            ToolKind::TextToImage => "Image Generator",
            ToolKind::SketchToImage => "Sketch to Image",
            ToolKind::ProductAd => "Ad Enhancer",
            ToolKind::ImageEditor => "Image Editor",
            ToolKind::Thumbnail => "Thumbnail Gen",
        }
    }

    /// Stable identifier used in logs and placeholder seeds.
    pub fn slug(&self) -> &'static str {
        match self {
            ToolKind::PromptEnhancer => "prompt_enhancer",
            ToolKind::TextToImage => "text_to_image",
            ToolKind::SketchToImage => "sketch_to_image",
            ToolKind::ProductAd => "product_ad",
            ToolKind::ImageEditor => "image_editor",
            ToolKind::Thumbnail => "thumbnail",
        }
    }

    /// Whether the tool produces text rather than an image.
    pub fn produces_text(&self) -> bool {
        matches!(self, ToolKind::PromptEnhancer)
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A fully specified generation request for one tool.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationRequest {
    PromptEnhance {
        prompt: String,
    },
    TextToImage {
        prompt: String,
        aspect_ratio: AspectRatio,
    },
    SketchToImage {
        sketch: ImageInput,
        /// Optional guidance; blank means the default instruction.
        prompt: String,
    },
    ProductAd {
        product: ImageInput,
        background: BackgroundStyle,
        lighting: Lighting,
    },
    ImageEdit {
        image: ImageInput,
        prompt: String,
    },
    Thumbnail {
        prompt: String,
        layout: ThumbnailLayout,
        font_style: FontStyle,
        aspect_ratio: AspectRatio,
    },
}

impl GenerationRequest {
    pub fn tool(&self) -> ToolKind {
        match self {
            GenerationRequest::PromptEnhance { .. } => ToolKind::PromptEnhancer,
            GenerationRequest::TextToImage { .. } => ToolKind::TextToImage,
            GenerationRequest::SketchToImage { .. } => ToolKind::SketchToImage,
            GenerationRequest::ProductAd { .. } => ToolKind::ProductAd,
            GenerationRequest::ImageEdit { .. } => ToolKind::ImageEditor,
            GenerationRequest::Thumbnail { .. } => ToolKind::Thumbnail,
        }
    }

    /// The user's own text, if the tool takes any. Product ads have none.
    pub fn prompt(&self) -> &str {
        match self {
            GenerationRequest::PromptEnhance { prompt }
            | GenerationRequest::TextToImage { prompt, .. }
            | GenerationRequest::SketchToImage { prompt, .. }
            | GenerationRequest::ImageEdit { prompt, .. }
            | GenerationRequest::Thumbnail { prompt, .. } => prompt,
            GenerationRequest::ProductAd { .. } => "",
        }
    }
}

/// What a generation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResult {
    Text(String),
    /// A displayable image reference: a `data:` URI or, for placeholders, a URL.
    Image(String),
    /// The provider answered but nothing could be extracted.
    Empty,
}

impl GenerationResult {
    pub fn is_empty(&self) -> bool {
        match self {
            GenerationResult::Text(s) | GenerationResult::Image(s) => s.is_empty(),
            GenerationResult::Empty => true,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            GenerationResult::Text(s) | GenerationResult::Image(s) => s,
            GenerationResult::Empty => "",
        }
    }
}

/// Where a result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Provider,
    Placeholder,
}

/// A result together with its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub result: GenerationResult,
    pub origin: Origin,
}

impl Generation {
    pub fn provider(result: GenerationResult) -> Self {
        Self {
            result,
            origin: Origin::Provider,
        }
    }

    pub fn placeholder(result: GenerationResult) -> Self {
        Self {
            result,
            origin: Origin::Placeholder,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.origin == Origin::Placeholder
    }
}
