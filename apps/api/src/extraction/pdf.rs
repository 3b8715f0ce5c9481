//! Structured document-text extraction via the `pdf-extract` crate.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractorError {
    #[error("document parse failed: {0}")]
    Parse(String),
}

/// Reads a document's internal text layer directly, no rasterization.
///
/// Carried in `AppState` as `Arc<dyn TextExtractor>` so tests can swap in
/// deterministic fakes.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, payload: &[u8]) -> Result<String, ExtractorError>;
}

/// `pdf-extract`-backed text layer reader.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, payload: &[u8]) -> Result<String, ExtractorError> {
        let bytes = payload.to_vec();

        // PDF parsing is CPU-bound; keep it off the async workers.
        tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes)
                .map_err(|e| ExtractorError::Parse(e.to_string()))
        })
        .await
        .map_err(|e| ExtractorError::Parse(format!("extraction task aborted: {e}")))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_garbage_bytes_report_parse_error() {
        let err = PdfTextExtractor
            .extract(b"definitely not a pdf document")
            .await
            .unwrap_err();

        assert!(matches!(err, ExtractorError::Parse(_)));
    }
}
