//! OCR fallback driving the tesseract and pdftoppm command-line tools.
//!
//! PDF payloads are rasterized page by page at 300 DPI before
//! recognition; image payloads go straight to tesseract.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tempfile::TempDir;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("{tool} not found (install {package})")]
    ToolMissing {
        tool: &'static str,
        package: &'static str,
    },

    #[error("unsupported file type for OCR: {0}")]
    Unsupported(String),

    #[error("{0}")]
    Failed(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Optical character recognition over a rasterizable payload.
///
/// Carried in `AppState` as `Arc<dyn OcrEngine>`; the real backend shells
/// out, tests swap in spies.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(&self, payload: &[u8], language: &str) -> Result<String, OcrError>;
}

/// Tesseract-based OCR backend.
pub struct TesseractOcr;

impl TesseractOcr {
    async fn run_tesseract(image_path: &Path, language: &str) -> Result<String, OcrError> {
        let output = Command::new("tesseract")
            .arg(image_path)
            .arg("stdout")
            .args(["-l", language])
            .output()
            .await;

        match output {
            Ok(output) if output.status.success() => {
                Ok(String::from_utf8_lossy(&output.stdout).to_string())
            }
            Ok(output) => Err(OcrError::Failed(format!(
                "tesseract failed: {}",
                String::from_utf8_lossy(&output.stderr)
            ))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(OcrError::ToolMissing {
                tool: "tesseract",
                package: "tesseract-ocr",
            }),
            Err(e) => Err(OcrError::Io(e)),
        }
    }

    /// Convert every page of a PDF to a PNG, returning the page images in
    /// page order.
    async fn rasterize_pdf(pdf_path: &Path, out_dir: &Path) -> Result<Vec<PathBuf>, OcrError> {
        let status = Command::new("pdftoppm")
            .args(["-png", "-r", "300"])
            .arg(pdf_path)
            .arg(out_dir.join("page"))
            .status()
            .await;

        match status {
            Ok(s) if s.success() => {}
            Ok(_) => {
                return Err(OcrError::Failed(
                    "pdftoppm failed to convert PDF".to_string(),
                ))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(OcrError::ToolMissing {
                    tool: "pdftoppm",
                    package: "poppler-utils",
                })
            }
            Err(e) => return Err(OcrError::Io(e)),
        }

        // pdftoppm names files page-01.png, page-02.png, …; lexicographic
        // order is page order.
        let mut pages: Vec<PathBuf> = std::fs::read_dir(out_dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().map(|ext| ext == "png").unwrap_or(false))
            .collect();
        pages.sort();

        if pages.is_empty() {
            return Err(OcrError::Failed("no pages rendered from PDF".to_string()));
        }
        Ok(pages)
    }
}

#[async_trait]
impl OcrEngine for TesseractOcr {
    async fn recognize(&self, payload: &[u8], language: &str) -> Result<String, OcrError> {
        let staging = TempDir::new()?;
        let input_path = staging.path().join("upload");
        tokio::fs::write(&input_path, payload).await?;

        match infer::get(payload) {
            Some(kind) if kind.mime_type() == "application/pdf" => {
                let pages = Self::rasterize_pdf(&input_path, staging.path()).await?;
                let total = pages.len();
                let mut text = String::new();
                for (i, page) in pages.iter().enumerate() {
                    debug!("ocr page {}/{}", i + 1, total);
                    if !text.is_empty() {
                        text.push_str("\n\n");
                    }
                    text.push_str(&Self::run_tesseract(page, language).await?);
                }
                Ok(text)
            }
            Some(kind) if kind.matcher_type() == infer::MatcherType::Image => {
                Self::run_tesseract(&input_path, language).await
            }
            Some(kind) => Err(OcrError::Unsupported(kind.mime_type().to_string())),
            None => Err(OcrError::Unsupported("unknown".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unrecognized_payload_is_unsupported() {
        let err = TesseractOcr
            .recognize(b"plain text, no magic bytes", "eng")
            .await
            .unwrap_err();

        assert!(matches!(err, OcrError::Unsupported(_)));
    }

    #[tokio::test]
    async fn test_zip_payload_is_unsupported() {
        // A zip archive is neither a PDF nor an image.
        let err = TesseractOcr
            .recognize(b"PK\x03\x04rest-of-archive", "eng")
            .await
            .unwrap_err();

        match err {
            OcrError::Unsupported(mime) => assert_eq!(mime, "application/zip"),
            other => panic!("expected Unsupported, got {other:?}"),
        }
    }
}
