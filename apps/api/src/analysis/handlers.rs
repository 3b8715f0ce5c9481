//! Axum route handler for the resume screening pipeline.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::analysis::generator::generate_report;
use crate::errors::AppError;
use crate::extraction::extract_resume_text;
use crate::state::AppState;

/// Role assumed when the upload does not name one.
pub const DEFAULT_TARGET_ROLE: &str = "Software Developer (Fresher)";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub target_role: String,
    pub file_name: String,
    pub extracted_chars: usize,
    pub analysis: Value,
}

/// POST /resume/upload
///
/// Full screening pipeline: multipart read → text extraction (with OCR
/// fallback) → AI analysis. The pipeline runs to completion or failure
/// before any response bytes are written; no partial responses.
pub async fn handle_resume_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut resume: Option<(String, Bytes)> = None;
    let mut target_role: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        // name/file_name borrow the field; copy them out before bytes()
        // consumes it.
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("resume") => {
                let file_name = field.file_name().unwrap_or("resume").to_string();
                let payload = field.bytes().await?;
                resume = Some((file_name, payload));
            }
            Some("targetRole") => {
                let role = field.text().await?;
                if !role.trim().is_empty() {
                    target_role = Some(role.trim().to_string());
                }
            }
            _ => {} // unknown fields are ignored
        }
    }

    let (file_name, payload) = resume.ok_or(AppError::MissingFile)?;
    let target_role = target_role.unwrap_or_else(|| DEFAULT_TARGET_ROLE.to_string());

    info!(
        "screening '{}' ({} bytes) against role '{}'",
        file_name,
        payload.len(),
        target_role
    );

    let extracted = extract_resume_text(
        state.extractor.as_ref(),
        state.ocr.as_ref(),
        &payload,
        &state.config.ocr_language,
    )
    .await?;

    let analysis = generate_report(state.llm.as_ref(), &extracted.text, &target_role).await?;

    Ok(Json(UploadResponse {
        target_role,
        file_name,
        extracted_chars: extracted.chars,
        analysis,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
        Router,
    };
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::extraction::ocr::{OcrEngine, OcrError};
    use crate::extraction::pdf::{ExtractorError, TextExtractor};
    use crate::llm_client::{CompletionClient, LlmError};
    use crate::routes::build_router;

    const BOUNDARY: &str = "screening-test-boundary";
    const FAKE_REPORT: &str = r#"{"atsScore": 91, "strengths": ["solid"], "summary": "good"}"#;

    struct FakeExtractor {
        text: Option<String>,
    }

    #[async_trait]
    impl TextExtractor for FakeExtractor {
        async fn extract(&self, _payload: &[u8]) -> Result<String, ExtractorError> {
            match &self.text {
                Some(t) => Ok(t.clone()),
                None => Err(ExtractorError::Parse("synthetic parser failure".to_string())),
            }
        }
    }

    struct SpyOcr {
        calls: AtomicUsize,
        text: String,
    }

    impl SpyOcr {
        fn returning(text: &str) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                text: text.to_string(),
            })
        }
    }

    #[async_trait]
    impl OcrEngine for SpyOcr {
        async fn recognize(&self, _payload: &[u8], _language: &str) -> Result<String, OcrError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.text.clone())
        }
    }

    struct FakeLlm {
        reply: &'static str,
    }

    #[async_trait]
    impl CompletionClient for FakeLlm {
        async fn complete(&self, _system: &str, _prompt: &str) -> Result<String, LlmError> {
            Ok(self.reply.to_string())
        }
    }

    fn test_config() -> Config {
        Config {
            anthropic_api_key: "test-key".to_string(),
            port: 0,
            public_dir: "public".to_string(),
            ocr_language: "eng".to_string(),
            rust_log: "info".to_string(),
        }
    }

    fn test_router(
        extractor_text: Option<&str>,
        ocr: Arc<SpyOcr>,
        llm_reply: &'static str,
    ) -> Router {
        build_router(AppState {
            config: test_config(),
            extractor: Arc::new(FakeExtractor {
                text: extractor_text.map(str::to_string),
            }),
            ocr,
            llm: Arc::new(FakeLlm { reply: llm_reply }),
        })
    }

    /// Builds a multipart body. `filename: Some(..)` marks a file part.
    fn multipart_body(parts: &[(&str, Option<&str>, &str)]) -> String {
        let mut body = String::new();
        for (name, filename, value) in parts {
            body.push_str(&format!("--{BOUNDARY}\r\n"));
            match filename {
                Some(f) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{f}\"\r\n\
                     Content-Type: application/pdf\r\n\r\n"
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                )),
            }
            body.push_str(value);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        body
    }

    fn upload_request(body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/resume/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn response_json(response: Response) -> (StatusCode, Value) {
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_missing_file_field_is_400() {
        let app = test_router(Some("unused"), SpyOcr::returning("unused"), FAKE_REPORT);
        let body = multipart_body(&[("targetRole", None, "Backend Engineer")]);

        let response = app.oneshot(upload_request(body)).await.unwrap();
        let (status, json) = response_json(response).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, json!({"error": "File not uploaded"}));
    }

    #[tokio::test]
    async fn test_text_layer_success_skips_ocr_and_reports() {
        let ocr = SpyOcr::returning("never used");
        let text = "A".repeat(200);
        let app = test_router(Some(&text), ocr.clone(), FAKE_REPORT);
        let body = multipart_body(&[("resume", Some("resume.pdf"), "%PDF-fake-bytes")]);

        let response = app.oneshot(upload_request(body)).await.unwrap();
        let (status, json) = response_json(response).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["extractedChars"], 200);
        assert_eq!(json["fileName"], "resume.pdf");
        assert_eq!(json["targetRole"], DEFAULT_TARGET_ROLE);
        assert_eq!(
            json["analysis"],
            json!({"atsScore": 91, "strengths": ["solid"], "summary": "good"})
        );
        assert_eq!(ocr.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_ocr_fallback_feeds_analysis() {
        let ocr = SpyOcr::returning(&"B".repeat(120));
        let app = test_router(Some(""), ocr.clone(), FAKE_REPORT);
        let body = multipart_body(&[("resume", Some("scan.pdf"), "%PDF-scanned")]);

        let response = app.oneshot(upload_request(body)).await.unwrap();
        let (status, json) = response_json(response).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["extractedChars"], 120);
        assert_eq!(ocr.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_no_text_from_either_path_is_400() {
        let app = test_router(Some(""), SpyOcr::returning("  \n "), FAKE_REPORT);
        let body = multipart_body(&[("resume", Some("blank.pdf"), "%PDF-blank")]);

        let response = app.oneshot(upload_request(body)).await.unwrap();
        let (status, json) = response_json(response).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json,
            json!({
                "error": "Could not extract text from PDF. Please upload a proper text-based resume."
            })
        );
    }

    #[tokio::test]
    async fn test_undecodable_ai_reply_is_generic_500() {
        let text = "C".repeat(90);
        let app = test_router(
            Some(&text),
            SpyOcr::returning("unused"),
            "I am sorry, I cannot do that.",
        );
        let body = multipart_body(&[("resume", Some("resume.pdf"), "%PDF-fake")]);

        let response = app.oneshot(upload_request(body)).await.unwrap();
        let (status, json) = response_json(response).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json, json!({"error": "AI analysis failed. Please try again."}));
    }

    #[tokio::test]
    async fn test_provided_target_role_is_echoed() {
        let text = "D".repeat(90);
        let app = test_router(Some(&text), SpyOcr::returning("unused"), FAKE_REPORT);
        let body = multipart_body(&[
            ("resume", Some("resume.pdf"), "%PDF-fake"),
            ("targetRole", None, "Platform Engineer"),
        ]);

        let response = app.oneshot(upload_request(body)).await.unwrap();
        let (_, json) = response_json(response).await;

        assert_eq!(json["targetRole"], "Platform Engineer");
    }

    #[tokio::test]
    async fn test_blank_target_role_falls_back_to_default() {
        let text = "E".repeat(90);
        let app = test_router(Some(&text), SpyOcr::returning("unused"), FAKE_REPORT);
        let body = multipart_body(&[
            ("resume", Some("resume.pdf"), "%PDF-fake"),
            ("targetRole", None, "   "),
        ]);

        let response = app.oneshot(upload_request(body)).await.unwrap();
        let (_, json) = response_json(response).await;

        assert_eq!(json["targetRole"], DEFAULT_TARGET_ROLE);
    }

    #[tokio::test]
    async fn test_identical_requests_yield_identical_bodies() {
        let text = "F".repeat(150);
        let app = test_router(Some(&text), SpyOcr::returning("unused"), FAKE_REPORT);
        let body = multipart_body(&[("resume", Some("resume.pdf"), "%PDF-fake")]);

        let first = app
            .clone()
            .oneshot(upload_request(body.clone()))
            .await
            .unwrap();
        let second = app.oneshot(upload_request(body)).await.unwrap();

        let first_bytes = to_bytes(first.into_body(), usize::MAX).await.unwrap();
        let second_bytes = to_bytes(second.into_body(), usize::MAX).await.unwrap();
        assert_eq!(first_bytes, second_bytes);
    }

    #[tokio::test]
    async fn test_root_serves_server_banner() {
        let app = test_router(Some("unused"), SpyOcr::returning("unused"), FAKE_REPORT);

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let (status, json) = response_json(response).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({"message": "this message is from server"}));
    }

    #[tokio::test]
    async fn test_health_probe_responds() {
        let app = test_router(Some("unused"), SpyOcr::returning("unused"), FAKE_REPORT);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let (status, json) = response_json(response).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
    }
}
