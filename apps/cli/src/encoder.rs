//! Binary encoder — file bytes to a transport-safe base64 payload.
//! MIME validation happens upstream in the shell; this module never sees a
//! rejected file.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::errors::AppError;

/// Reads the file at `path` and returns its contents base64-encoded with
/// the STANDARD alphabet, without any data-URI prefix.
pub async fn encode_file(path: &Path) -> Result<String, AppError> {
    let bytes = tokio::fs::read(path).await?;
    Ok(STANDARD.encode(bytes))
}

/// Decodes a `data:image/png;base64,...` URI back into raw PNG bytes.
/// Used when persisting generated illustrations to disk.
pub fn decode_png_data_uri(uri: &str) -> Option<Vec<u8>> {
    let payload = uri.strip_prefix("data:image/png;base64,")?;
    STANDARD.decode(payload).ok()
}
