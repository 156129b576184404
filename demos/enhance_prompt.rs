//! Rewrites a short prompt into a richer one.
//!
//! Usage:
//! `GEMINI_API_KEY=... cargo run --example enhance_prompt -- "a cat"`

use atelier::{CredentialStore, Gateway, GatewayConfig, GenerationResult};
use std::env;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let credentials = Arc::new(CredentialStore::in_memory());
    credentials.seed_from_env();

    let prompt = env::args().nth(1).unwrap_or_else(|| "a cat".to_string());
    let gateway = Gateway::new(GatewayConfig::from_env(), credentials)?;

    let generation = gateway.enhance_prompt(&prompt).await?;
    match generation.result {
        GenerationResult::Text(text) => println!("{}", text),
        _ => println!("Failed to enhance prompt."),
    }

    Ok(())
}
