//! Mock illustration generation — the decorative before/after images shown
//! on the landing view. Strictly best-effort: any failure here collapses to
//! `None` and must never block or fail the resume workflow.

use tracing::warn;

use crate::gemini::{
    Content, GeminiClient, GenerateContentRequest, GenerationConfig, ImageConfig, Part,
    IMAGE_MODEL,
};

/// Prompt for the "before" card: a messy LinkedIn export.
pub const BEFORE_PROMPT: &str = "A messy, 2-column LinkedIn profile PDF document with \
profile pictures, blue icons, and abstract text sidebars, high resolution, white \
background, realistic professional look.";

/// Prompt for the "after" card: a clean ATS-ready resume.
pub const AFTER_PROMPT: &str = "A clean, professional, single-column modern ATS-friendly \
resume document with minimalist headings, structured bullet points, and elegant \
typography, high resolution, white background.";

const ASPECT_RATIO: &str = "3:4";

/// Requests one illustrative image and returns it as a
/// `data:image/png;base64,...` URI.
///
/// Returns `None` both when the call fails and when the response carries no
/// inline image part — absence of a decoration is not an error.
pub async fn generate_illustration(client: &GeminiClient, prompt: &str) -> Option<String> {
    let request = GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part::text(prompt)],
        }],
        generation_config: Some(GenerationConfig {
            image_config: Some(ImageConfig {
                aspect_ratio: ASPECT_RATIO.to_string(),
            }),
            ..Default::default()
        }),
    };

    match client.generate(IMAGE_MODEL, &request).await {
        Ok(response) => response
            .inline_data()
            .map(|part| format!("data:image/png;base64,{}", part.data)),
        Err(e) => {
            warn!("Illustration generation failed: {e}");
            None
        }
    }
}

/// Fetches the before/after pair concurrently and returns both slots once
/// both settle. Each slot is independently nullable.
pub async fn generate_mock_pair(client: &GeminiClient) -> (Option<String>, Option<String>) {
    tokio::join!(
        generate_illustration(client, BEFORE_PROMPT),
        generate_illustration(client, AFTER_PROMPT),
    )
}
