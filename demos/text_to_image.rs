//! Generates an image from a text prompt.
//!
//! Reads the key from `GEMINI_API_KEY` (a `.env` file is honored) and keeps it
//! in a JSON settings file so later runs don't need the variable.
//!
//! Usage:
//! `cargo run --example text_to_image -- "a red fox in the snow" 16:9`

use atelier::{AspectRatio, CredentialStore, FileStore, Gateway, GatewayConfig};
use std::env;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = GatewayConfig::from_env();
    let credentials = Arc::new(CredentialStore::new(Arc::new(FileStore::new(
        "atelier-settings.json",
    ))));
    if let Ok(key) = env::var(atelier::credential::CREDENTIAL_ENV) {
        credentials.set_credential(key.trim());
    }

    let mut args = env::args().skip(1);
    let prompt = args.next().unwrap_or_else(|| "a red fox".to_string());
    let aspect_ratio: AspectRatio = match args.next() {
        Some(ratio) => ratio.parse()?,
        None => AspectRatio::Square,
    };

    let gateway = Gateway::new(config, credentials)?;
    println!("Generating '{}' at {}", prompt, aspect_ratio);

    match gateway.text_to_image(&prompt, aspect_ratio).await {
        Ok(generation) if generation.is_placeholder() => {
            println!("Provider call failed; placeholder: {}", generation.result.as_str());
        }
        Ok(generation) if generation.result.is_empty() => {
            println!("The model returned no image.");
        }
        Ok(generation) => {
            let uri = generation.result.as_str();
            println!("Received image data URI ({} bytes)", uri.len());
        }
        Err(e) if e.is_missing_credential() => {
            eprintln!("{}", atelier::view::MISSING_CREDENTIAL_PROMPT);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
        }
    }

    Ok(())
}
