use std::env;
use std::str::FromStr;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";

/// What the gateway does when the provider call fails for any reason other
/// than a missing credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Return a deterministic placeholder and log the substitution.
    #[default]
    Placeholder,
    /// Return the error to the caller.
    Surface,
}

impl FromStr for FallbackPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "placeholder" => Ok(FallbackPolicy::Placeholder),
            "surface" => Ok(FallbackPolicy::Surface),
            other => Err(format!("unknown fallback policy '{}'", other)),
        }
    }
}

/// Gateway settings. The credential is deliberately not part of this; it
/// lives in the [`CredentialStore`](crate::CredentialStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub base_url: String,
    pub text_model: String,
    pub image_model: String,
    pub fallback: FallbackPolicy,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            fallback: FallbackPolicy::default(),
        }
    }
}

impl GatewayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `.env` if present, then overrides defaults from `ATELIER_*` variables.
    ///
    /// Unparseable values are ignored with a warning.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();
        if let Ok(url) = env::var("ATELIER_BASE_URL") {
            config.base_url = url;
        }
        if let Ok(model) = env::var("ATELIER_TEXT_MODEL") {
            config.text_model = model;
        }
        if let Ok(model) = env::var("ATELIER_IMAGE_MODEL") {
            config.image_model = model;
        }
        if let Ok(policy) = env::var("ATELIER_FALLBACK") {
            match policy.parse() {
                Ok(policy) => config.fallback = policy,
                Err(e) => tracing::warn!("ignoring ATELIER_FALLBACK: {}", e),
            }
        }
        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_text_model(mut self, model: impl Into<String>) -> Self {
        self.text_model = model.into();
        self
    }

    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }

    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fallback_policy() {
        assert_eq!("Surface".parse::<FallbackPolicy>(), Ok(FallbackPolicy::Surface));
        assert_eq!(
            " placeholder ".parse::<FallbackPolicy>(),
            Ok(FallbackPolicy::Placeholder)
        );
        assert!("retry".parse::<FallbackPolicy>().is_err());
    }

    #[test]
    fn builder_setters_override_defaults() {
        let config = GatewayConfig::new()
            .with_base_url("http://localhost:9000/")
            .with_image_model("imagen")
            .with_fallback(FallbackPolicy::Surface);
        assert_eq!(config.base_url, "http://localhost:9000/");
        assert_eq!(config.image_model, "imagen");
        assert_eq!(config.text_model, DEFAULT_TEXT_MODEL);
        assert_eq!(config.fallback, FallbackPolicy::Surface);
    }
}
