//! Request/response gateway for the Wanderer's Atelier creative-AI tools.
//!
//! The crate sits between six creative tools (prompt enhancement, text-to-image,
//! sketch-to-image, product-ad enhancement, image editing and thumbnail
//! generation) and the hosted Gemini `generateContent` API.
//!
//! ## Features
//! - A credential store with pluggable durable backing (memory or JSON file).
//! - One request builder for all tools, dispatched on [`GenerationRequest`].
//! - Result extraction that tolerates missing response fields.
//! - Explicit, configurable placeholder substitution on remote failures.
//! - Headless state machines for the tool panels and the application shell.
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use atelier::{AspectRatio, CredentialStore, Gateway, GatewayConfig};
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let credentials = Arc::new(CredentialStore::in_memory());
//! credentials.set_credential("your_api_key");
//! let gateway = Gateway::new(GatewayConfig::from_env(), credentials)?;
//! let generation = gateway.text_to_image("a red fox", AspectRatio::Square).await?;
//! println!("{}", generation.result.as_str());
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod credential;
pub mod error;
pub mod gateway;
pub mod placeholder;
pub mod shell;
pub mod transport;
pub mod types;
pub mod view;
pub mod wire;

pub use config::{FallbackPolicy, GatewayConfig};
pub use credential::{CredentialStore, FileStore, KeyValueStore, MemoryStore};
pub use error::{AtelierError, ErrorKind};
pub use gateway::Gateway;
pub use shell::Shell;
pub use transport::{HttpTransport, Transport};
pub use types::{
    AspectRatio, BackgroundStyle, FontStyle, Generation, GenerationRequest, GenerationResult,
    ImageInput, Lighting, Origin, ThumbnailLayout, ToolKind,
};
pub use view::{ToolView, ViewFailure, ViewState};
