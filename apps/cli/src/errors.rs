use thiserror::Error;

use crate::gemini::GeminiError;

/// User-facing message for any extraction failure, regardless of cause.
/// The shell does not distinguish timeout vs malformed output vs service
/// error; the real cause goes to the log, not the user.
pub const EXTRACTION_FAILED_MSG: &str = "Failed to process the LinkedIn PDF. \
Please ensure the file is a standard LinkedIn profile download.";

/// Fallback shown when an error carries no message of its own.
pub const GENERIC_PROCESSING_MSG: &str = "An error occurred during processing.";

/// Application-level error type. Every variant's `Display` output is a
/// free-text message intended for direct inline display by the shell.
#[derive(Debug, Error)]
pub enum AppError {
    /// Wrong file type or missing file. Recoverable — the user corrects
    /// the input.
    #[error("{0}")]
    Validation(String),

    /// The AI service call or response parse failed. Recoverable — the
    /// user may re-submit. Always carries [`EXTRACTION_FAILED_MSG`].
    #[error("{0}")]
    Extraction(String),

    /// The input file could not be read (device/permission/corruption).
    #[error("Failed to read the selected file: {0}")]
    Read(#[from] std::io::Error),
}

impl From<GeminiError> for AppError {
    /// Service-level failures all collapse into the single extraction
    /// message; the caller's error surface is deliberately generic.
    fn from(err: GeminiError) -> Self {
        tracing::error!("Extraction call failed: {err}");
        AppError::Extraction(EXTRACTION_FAILED_MSG.to_string())
    }
}
