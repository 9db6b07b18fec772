//! Resume extraction — turns an encoded LinkedIn PDF into a [`ResumeRecord`]
//! with one schema-constrained Gemini call. All failures collapse into the
//! single user-facing extraction message; there are no partial results.

pub mod prompts;

use tracing::error;

use crate::errors::{AppError, EXTRACTION_FAILED_MSG};
use crate::gemini::{
    Content, GeminiClient, GenerateContentRequest, GenerationConfig, Part, TEXT_MODEL,
};
use crate::models::resume::ResumeRecord;

/// Extracts and rewrites the resume content of an encoded PDF.
///
/// One attempt per invocation. Either a complete, schema-valid record comes
/// back or `AppError::Extraction` is raised — the caller cannot observe
/// which stage failed.
pub async fn extract_resume(
    client: &GeminiClient,
    pdf_base64: &str,
) -> Result<ResumeRecord, AppError> {
    let request = GenerateContentRequest {
        contents: vec![Content {
            parts: vec![
                Part::inline_data("application/pdf", pdf_base64),
                Part::text(prompts::EXTRACTION_PROMPT),
            ],
        }],
        generation_config: Some(GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(prompts::resume_response_schema()),
            image_config: None,
        }),
    };

    let response = client.generate(TEXT_MODEL, &request).await?;

    let text = response.text().ok_or_else(|| {
        error!("Extraction response contained no text part");
        AppError::Extraction(EXTRACTION_FAILED_MSG.to_string())
    })?;

    serde_json::from_str::<ResumeRecord>(text).map_err(|e| {
        error!("Failed to parse extraction response as a resume record: {e}");
        AppError::Extraction(EXTRACTION_FAILED_MSG.to_string())
    })
}
