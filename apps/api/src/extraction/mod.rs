//! Resume text extraction — structured document-text first, OCR as a
//! pure fallback, with a minimum-length gate before analysis.

pub mod ocr;
pub mod pdf;

use thiserror::Error;
use tracing::{info, warn};

pub use ocr::OcrEngine;
pub use pdf::TextExtractor;

/// Minimum trimmed length for extracted text to be worth analyzing.
pub const MIN_RESUME_CHARS: usize = 50;

/// Ways the extraction pipeline can fail. All of these surface to the
/// client as `400` with the message below.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Could not extract text from PDF. Please upload a proper text-based resume.")]
    NoTextFound,

    #[error("Extracted text is too short to analyze. Please upload a complete resume.")]
    TextTooShort,

    #[error("Could not read the document image: {0}")]
    OcrFailed(String),
}

/// Trimmed resume text and its character count.
#[derive(Debug, Clone)]
pub struct ExtractedText {
    pub text: String,
    pub chars: usize,
}

/// Runs the extraction chain over an uploaded payload.
///
/// Structured extraction is always preferred; OCR runs only when the text
/// layer yields nothing at all. A short garbled text-layer result fails
/// as `TextTooShort` without attempting OCR. Single attempt per method,
/// no retries.
pub async fn extract_resume_text(
    extractor: &dyn TextExtractor,
    ocr: &dyn OcrEngine,
    payload: &[u8],
    language: &str,
) -> Result<ExtractedText, ExtractionError> {
    // The text-layer capability contract is "empty on failure, never
    // raise" — absorb parser errors here and fall through to OCR.
    let direct = match extractor.extract(payload).await {
        Ok(text) => text,
        Err(e) => {
            warn!("document text extraction failed, treating as empty: {e}");
            String::new()
        }
    };

    let text = if !direct.trim().is_empty() {
        let trimmed = direct.trim();
        info!("text layer yielded {} chars", trimmed.chars().count());
        trimmed.to_string()
    } else {
        info!("text layer empty, falling back to OCR");
        match ocr.recognize(payload, language).await {
            Ok(recognized) => {
                let trimmed = recognized.trim();
                if trimmed.is_empty() {
                    return Err(ExtractionError::NoTextFound);
                }
                info!("OCR yielded {} chars", trimmed.chars().count());
                trimmed.to_string()
            }
            Err(e) => return Err(ExtractionError::OcrFailed(e.to_string())),
        }
    };

    let chars = text.chars().count();
    if chars < MIN_RESUME_CHARS {
        return Err(ExtractionError::TextTooShort);
    }

    Ok(ExtractedText { text, chars })
}
