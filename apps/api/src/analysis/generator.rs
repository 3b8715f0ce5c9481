//! Report Generator — builds the role-targeted prompt, submits it to the
//! completion client, and decodes the reply.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::analysis::decode::{decode_report, ReportDecode};
use crate::analysis::prompts::{ANALYSIS_PROMPT_TEMPLATE, ANALYSIS_SYSTEM};
use crate::errors::AppError;
use crate::llm_client::CompletionClient;

/// The reply shape the prompt demands.
///
/// The decoded reply is returned to callers as-is, without validation
/// against this contract — a reply with missing fields or wrong types
/// passes through unchanged. This struct documents the declared shape
/// and is exercised by tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub ats_score: u32,
    pub strengths: Vec<String>,
    pub weak_areas: Vec<String>,
    pub missing_skills: Vec<String>,
    pub project_gaps: Vec<String>,
    pub quick_fixes: Vec<String>,
    pub summary: String,
}

/// Runs the extracted resume text through the completion client and
/// decodes the reply as JSON.
///
/// Transport or API failures map to `AiAnalysisFailed`; a reply that
/// survives neither decode tier maps to `InvalidAiResponse`. Both
/// surface to the caller as the same generic 500.
pub async fn generate_report(
    llm: &dyn CompletionClient,
    resume_text: &str,
    target_role: &str,
) -> Result<Value, AppError> {
    let prompt = ANALYSIS_PROMPT_TEMPLATE
        .replace("{target_role}", target_role)
        .replace("{resume_text}", resume_text);

    let raw = llm
        .complete(ANALYSIS_SYSTEM, &prompt)
        .await
        .map_err(|e| AppError::AiAnalysisFailed(e.to_string()))?;

    let decoded = decode_report(&raw).map_err(|e| AppError::InvalidAiResponse(e.to_string()))?;
    if matches!(&decoded, ReportDecode::Recovered(_)) {
        debug!("analysis reply recovered from non-strict JSON");
    }

    Ok(decoded.into_value())
}
