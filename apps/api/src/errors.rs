use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Extraction-stage failures are client errors with specific messages;
/// AI-stage failures are server errors with one generic message — the
/// underlying detail is logged, never exposed to the caller.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("File not uploaded")]
    MissingFile,

    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("AI returned an unparseable reply: {0}")]
    InvalidAiResponse(String),

    #[error("AI analysis failed: {0}")]
    AiAnalysisFailed(String),
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::InvalidUpload(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::MissingFile => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::InvalidUpload(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::Extraction(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::InvalidAiResponse(detail) => {
                tracing::error!("AI reply did not decode: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "AI analysis failed. Please try again.".to_string(),
                )
            }
            AppError::AiAnalysisFailed(detail) => {
                tracing::error!("AI analysis failed: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "AI analysis failed. Please try again.".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_message() {
        assert_eq!(AppError::MissingFile.to_string(), "File not uploaded");
    }

    #[test]
    fn test_extraction_errors_keep_their_message() {
        let err = AppError::from(ExtractionError::NoTextFound);
        assert_eq!(
            err.to_string(),
            "Could not extract text from PDF. Please upload a proper text-based resume."
        );
    }
}
