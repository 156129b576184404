//! Headless state for the six tool panels.
//!
//! Every panel runs the same machine: `Idle -> Submitting -> Success | Failed`,
//! and may be resubmitted from either terminal state. Each submission is
//! issued a [`Ticket`]; a completion whose ticket is no longer current is
//! dropped, so results arriving after the view was cleared never land.

use crate::builder::validate;
use crate::error::{AtelierError, ErrorKind};
use crate::gateway::Gateway;
use crate::types::{
    AspectRatio, BackgroundStyle, FontStyle, Generation, GenerationRequest, GenerationResult,
    ImageInput, Lighting, ThumbnailLayout, ToolKind,
};

/// The call-to-action shown when a generation needs a credential.
pub const MISSING_CREDENTIAL_PROMPT: &str =
    "Please set your Gemini API Key in the Settings menu (Gear icon).";

/// Identifies one submission of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewFailure {
    /// The user has to open settings and enter a key.
    MissingCredential,
    InvalidInput(String),
    /// Only reachable when the gateway surfaces remote errors.
    Remote(String),
}

impl ViewFailure {
    fn from_error(error: &AtelierError) -> Self {
        match error.kind() {
            ErrorKind::MissingCredential => ViewFailure::MissingCredential,
            ErrorKind::InvalidInput => ViewFailure::InvalidInput(error.to_string()),
            ErrorKind::RemoteCallFailure => ViewFailure::Remote(error.to_string()),
        }
    }

    pub fn needs_settings(&self) -> bool {
        matches!(self, ViewFailure::MissingCredential)
    }

    pub fn message(&self) -> &str {
        match self {
            ViewFailure::MissingCredential => MISSING_CREDENTIAL_PROMPT,
            ViewFailure::InvalidInput(msg) | ViewFailure::Remote(msg) => msg,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Submitting(Ticket),
    Success(Generation),
    Failed(ViewFailure),
}

/// Everything a user can set on a panel. Tools ignore the fields they don't use.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolInputs {
    pub prompt: String,
    pub image: Option<ImageInput>,
    pub aspect_ratio: AspectRatio,
    pub background: BackgroundStyle,
    pub lighting: Lighting,
    pub layout: ThumbnailLayout,
    pub font_style: FontStyle,
}

impl ToolInputs {
    fn for_tool(kind: ToolKind) -> Self {
        let aspect_ratio = match kind {
            ToolKind::Thumbnail => AspectRatio::Landscape,
            _ => AspectRatio::Square,
        };
        Self {
            prompt: String::new(),
            image: None,
            aspect_ratio,
            background: BackgroundStyle::default(),
            lighting: Lighting::default(),
            layout: ThumbnailLayout::default(),
            font_style: FontStyle::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ToolView {
    kind: ToolKind,
    pub inputs: ToolInputs,
    state: ViewState,
    issued: u64,
}

impl ToolView {
    pub fn new(kind: ToolKind) -> Self {
        Self {
            kind,
            inputs: ToolInputs::for_tool(kind),
            state: ViewState::Idle,
            issued: 0,
        }
    }

    pub fn kind(&self) -> ToolKind {
        self.kind
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, ViewState::Submitting(_))
    }

    pub fn result(&self) -> Option<&GenerationResult> {
        match &self.state {
            ViewState::Success(generation) => Some(&generation.result),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&ViewFailure> {
        match &self.state {
            ViewState::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.inputs.prompt = prompt.into();
    }

    /// Replaces the uploaded image. A previous result no longer matches the
    /// new source, so a finished view goes back to `Idle`.
    pub fn set_image(&mut self, image: ImageInput) {
        self.inputs.image = Some(image);
        if matches!(self.state, ViewState::Success(_) | ViewState::Failed(_)) {
            self.state = ViewState::Idle;
        }
    }

    /// Clears inputs and output. An outstanding submission is abandoned.
    pub fn clear(&mut self) {
        self.inputs.prompt.clear();
        self.inputs.image = None;
        self.state = ViewState::Idle;
    }

    /// The request the current inputs describe, or `None` if something required is missing.
    pub fn request(&self) -> Option<GenerationRequest> {
        let inputs = &self.inputs;
        let prompt = inputs.prompt.clone();
        let request = match self.kind {
            ToolKind::PromptEnhancer => GenerationRequest::PromptEnhance { prompt },
            ToolKind::TextToImage => GenerationRequest::TextToImage {
                prompt,
                aspect_ratio: inputs.aspect_ratio,
            },
            ToolKind::SketchToImage => GenerationRequest::SketchToImage {
                sketch: inputs.image.clone()?,
                prompt,
            },
            ToolKind::ProductAd => GenerationRequest::ProductAd {
                product: inputs.image.clone()?,
                background: inputs.background,
                lighting: inputs.lighting,
            },
            ToolKind::ImageEditor => GenerationRequest::ImageEdit {
                image: inputs.image.clone()?,
                prompt,
            },
            ToolKind::Thumbnail => GenerationRequest::Thumbnail {
                prompt,
                layout: inputs.layout,
                font_style: inputs.font_style,
                aspect_ratio: inputs.aspect_ratio,
            },
        };
        validate(&request).ok().map(|_| request)
    }

    /// Whether the generate action is enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_submitting() && self.request().is_some()
    }

    /// Moves to `Submitting` and hands back the request to send.
    pub fn begin_submit(&mut self) -> Option<(Ticket, GenerationRequest)> {
        if self.is_submitting() {
            return None;
        }
        let request = self.request()?;
        self.issued += 1;
        let ticket = Ticket(self.issued);
        self.state = ViewState::Submitting(ticket);
        Some((ticket, request))
    }

    /// Records the outcome of a submission. Returns `false` if the ticket is
    /// stale and the outcome was discarded.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: Result<Generation, AtelierError>,
    ) -> bool {
        if self.state != ViewState::Submitting(ticket) {
            tracing::debug!(tool = self.kind.slug(), "discarding late generation result");
            return false;
        }
        self.state = match outcome {
            Ok(generation) => ViewState::Success(generation),
            Err(e) => {
                if e.kind() == ErrorKind::RemoteCallFailure {
                    tracing::error!(tool = self.kind.slug(), error = %e, "generation failed");
                }
                ViewState::Failed(ViewFailure::from_error(&e))
            }
        };
        true
    }

    /// Submits through `gateway` and waits for the outcome.
    ///
    /// Returns `false` without calling the gateway when the action is disabled.
    pub async fn submit(&mut self, gateway: &Gateway) -> bool {
        let Some((ticket, request)) = self.begin_submit() else {
            return false;
        };
        let outcome = gateway.generate(&request).await;
        self.complete(ticket, outcome)
    }
}
