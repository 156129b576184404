/// Represents the possible errors that can occur when talking to the generation service.
#[derive(Debug, thiserror::Error)]
pub enum AtelierError {
    #[error("API key is missing. Please add your Gemini API key in Settings.")]
    MissingCredential,
    #[error("Missing required input: {0}")]
    InvalidInput(String),
    #[error("Invalid image data URI: {0}")]
    InvalidDataUri(String),
    #[error("Network request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("Failed to parse API response: {0}")]
    ResponseParseFailed(#[from] serde_json::Error),
    #[error("API request failed with status {status}: {message}")]
    ApiError { status: u16, message: String },
    #[error("URL parsing failed: {0}")]
    UrlParseFailed(#[from] url::ParseError),
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Coarse classification of an [`AtelierError`], used to decide how a failure
/// is presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No credential is configured. Recoverable only by the user.
    MissingCredential,
    /// The request could not be built from the supplied inputs.
    InvalidInput,
    /// Anything that went wrong on the way to or from the provider.
    RemoteCallFailure,
}

impl AtelierError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AtelierError::MissingCredential => ErrorKind::MissingCredential,
            AtelierError::InvalidInput(_)
            | AtelierError::InvalidDataUri(_)
            | AtelierError::IoError(_) => ErrorKind::InvalidInput,
            AtelierError::RequestFailed(_)
            | AtelierError::ResponseParseFailed(_)
            | AtelierError::ApiError { .. }
            | AtelierError::UrlParseFailed(_) => ErrorKind::RemoteCallFailure,
        }
    }

    pub fn is_missing_credential(&self) -> bool {
        self.kind() == ErrorKind::MissingCredential
    }
}
