//! Deterministic stand-ins returned when the provider call fails.

use crate::types::{GenerationRequest, GenerationResult};
use sha2::{Digest, Sha256};

const PLACEHOLDER_IMAGE_BASE: &str = "https://picsum.photos/seed";

/// A stable 16-hex-digit seed derived from the tool and prompt.
pub fn seed(tool: &str, prompt: &str) -> String {
    let digest = Sha256::digest(format!("{}:{}", tool, prompt).as_bytes());
    digest
        .iter()
        .take(8)
        .map(|b| format!("{:02x}", b))
        .collect()
}

pub fn placeholder_for(request: &GenerationRequest) -> GenerationResult {
    let tool = request.tool();
    let prompt = request.prompt();
    if tool.produces_text() {
        return GenerationResult::Text(format!(
            "Enhanced version of: {} (Simulation: Error)",
            prompt
        ));
    }
    GenerationResult::Image(format!(
        "{}/{}/1024/1024",
        PLACEHOLDER_IMAGE_BASE,
        seed(tool.slug(), prompt)
    ))
}
