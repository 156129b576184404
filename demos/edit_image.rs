//! Applies a text edit to a local image, driving the editor panel headlessly.
//!
//! Usage:
//! `GEMINI_API_KEY=... cargo run --example edit_image -- assets/photo.jpg "add a rainbow"`

use atelier::{
    CredentialStore, Gateway, GatewayConfig, ImageInput, Shell, ToolKind, ViewState,
};
use std::env;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = env::args().skip(1);
    let path = args
        .next()
        .ok_or_else(|| anyhow::anyhow!("usage: edit_image <image> <instruction>"))?;
    let instruction = args.next().unwrap_or_else(|| "make it look vintage".to_string());

    let credentials = Arc::new(CredentialStore::in_memory());
    credentials.seed_from_env();
    let gateway = Gateway::new(GatewayConfig::from_env(), credentials.clone())?;

    let mut shell = Shell::new(credentials);
    if let Some(banner) = shell.credential_banner() {
        eprintln!("{}", banner);
    }
    shell.login();
    shell.select_tool(ToolKind::ImageEditor);

    let view = shell.current_view_mut();
    view.set_image(ImageInput::from_path(&path).await?);
    view.set_prompt(instruction);

    shell.generate_current(&gateway).await;
    match shell.current_view().state() {
        ViewState::Success(generation) => {
            println!(
                "Edited image ({}): {} bytes",
                if generation.is_placeholder() { "placeholder" } else { "provider" },
                generation.result.as_str().len()
            );
        }
        ViewState::Failed(failure) => eprintln!("{}", failure.message()),
        other => println!("Nothing generated: {:?}", other),
    }

    Ok(())
}
