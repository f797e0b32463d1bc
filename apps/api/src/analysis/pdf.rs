//! PDF text extraction for uploaded resumes.

use bytes::Bytes;

use crate::errors::AppError;

/// Minimum length of the trimmed extracted text for an analyzable resume.
pub const MIN_EXTRACTED_CHARS: usize = 100;

/// User-facing rejection for image-only or near-empty PDFs.
pub const INSUFFICIENT_TEXT_MSG: &str =
    "Could not extract enough text from PDF. Please ensure your resume contains text, not just images.";

/// Extracts text from PDF bytes.
///
/// pdf-extract walks the page tree synchronously, so the work runs on the
/// blocking pool rather than on a runtime worker.
pub async fn extract_text(pdf_bytes: Bytes) -> Result<String, AppError> {
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&pdf_bytes))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task failed: {e}")))?
        .map_err(|e| AppError::Pdf(e.to_string()))?;

    Ok(text)
}

/// Rejects extracted text too short to analyze. The length check runs on the
/// trimmed text; the untrimmed text is what gets analyzed.
pub fn check_extracted_text(text: &str) -> Result<(), AppError> {
    if text.trim().chars().count() < MIN_EXTRACTED_CHARS {
        return Err(AppError::Validation(INSUFFICIENT_TEXT_MSG.to_string()));
    }
    Ok(())
}
