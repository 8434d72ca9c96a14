//! Inline preview of an accepted file as a `data:` URL.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::file::SubmissionFile;

#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    #[error("Failed to read file for preview: {0}")]
    Read(#[from] std::io::Error),

    #[error("Preview generation timed out")]
    Timeout,
}

/// Encode the full file body as `data:<declared mime>;base64,<payload>`.
pub async fn build_preview(file: &SubmissionFile) -> Result<String, PreviewError> {
    let data = file.read_all().await?;
    Ok(format!(
        "data:{};base64,{}",
        file.mime_type(),
        STANDARD.encode(data)
    ))
}
