use std::sync::Arc;

use crate::config::Config;
use crate::extraction::{OcrEngine, TextExtractor};
use crate::llm_client::CompletionClient;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// The three external capabilities (document text layer, OCR engine,
/// completion client) are trait objects so tests substitute deterministic
/// fakes without touching handler code.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub extractor: Arc<dyn TextExtractor>,
    pub ocr: Arc<dyn OcrEngine>,
    pub llm: Arc<dyn CompletionClient>,
}
