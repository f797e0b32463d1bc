use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::analysis::pdf;
use crate::errors::AppError;
use crate::models::analysis::ResumeAnalysis;
use crate::state::AppState;

/// Upload cap for resume PDFs.
pub const MAX_FILE_BYTES: usize = 5 * 1024 * 1024;

pub const NO_FILE_MSG: &str = "No file uploaded";
pub const WRONG_TYPE_MSG: &str = "Only PDF files are allowed";
pub const TOO_LARGE_MSG: &str = "File size must be less than 5MB";

/// POST /api/analyze-resume
///
/// Multipart form with a single `resume` file field. Validation failures are
/// 400s carrying their message verbatim; extraction and analysis failures are
/// 500s. An accepted analysis is written through to both storage slots before
/// the response goes out.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResumeAnalysis>, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(upload_read_error)? {
        if field.name() != Some("resume") {
            continue;
        }

        // content_type must be captured before bytes() consumes the field
        let content_type = field.content_type().map(str::to_owned);
        let data = field.bytes().await.map_err(upload_read_error)?;

        validate_upload(content_type.as_deref(), data.len())?;

        info!("Received resume upload ({} bytes)", data.len());

        let text = pdf::extract_text(data).await?;
        pdf::check_extracted_text(&text)?;

        let analysis = state.analyzer.analyze(&text).await?;
        state.report.accept(&analysis);

        return Ok(Json(analysis));
    }

    Err(AppError::Validation(NO_FILE_MSG.to_string()))
}

/// Maps a failed multipart read to its wire error. The router's body cap
/// trips while an oversize file field is still streaming, so those uploads
/// never reach `validate_upload` and get the size message here instead.
fn upload_read_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::Validation(TOO_LARGE_MSG.to_string());
    }
    AppError::Validation(format!("Invalid upload: {err}"))
}

/// Rejects uploads that are not PDFs or exceed the size cap.
fn validate_upload(content_type: Option<&str>, len: usize) -> Result<(), AppError> {
    if content_type != Some("application/pdf") {
        return Err(AppError::Validation(WRONG_TYPE_MSG.to_string()));
    }
    if len > MAX_FILE_BYTES {
        return Err(AppError::Validation(TOO_LARGE_MSG.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validation_message(err: AppError) -> String {
        match err {
            AppError::Validation(msg) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_upload_accepts_pdf_under_cap() {
        assert!(validate_upload(Some("application/pdf"), 1024).is_ok());
    }

    #[test]
    fn test_validate_upload_accepts_exact_cap() {
        assert!(validate_upload(Some("application/pdf"), MAX_FILE_BYTES).is_ok());
    }

    #[test]
    fn test_validate_upload_rejects_one_byte_over_cap() {
        let err = validate_upload(Some("application/pdf"), MAX_FILE_BYTES + 1).unwrap_err();
        assert_eq!(validation_message(err), TOO_LARGE_MSG);
    }

    #[test]
    fn test_validate_upload_rejects_wrong_type() {
        let err = validate_upload(Some("text/plain"), 1024).unwrap_err();
        assert_eq!(validation_message(err), WRONG_TYPE_MSG);
    }

    #[test]
    fn test_validate_upload_rejects_missing_type() {
        let err = validate_upload(None, 1024).unwrap_err();
        assert_eq!(validation_message(err), WRONG_TYPE_MSG);
    }

    #[test]
    fn test_validate_upload_type_check_runs_before_size_check() {
        let err = validate_upload(Some("image/png"), MAX_FILE_BYTES + 1).unwrap_err();
        assert_eq!(validation_message(err), WRONG_TYPE_MSG);
    }
}
