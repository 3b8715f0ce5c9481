// All LLM prompt constants for the Analysis module.

/// System prompt for resume analysis — enforces JSON-only output.
pub const ANALYSIS_SYSTEM: &str =
    "You are an experienced technical recruiter and ATS screening expert. \
    Evaluate a resume against a target role and produce a structured report. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Analysis prompt template. Replace `{target_role}` and `{resume_text}`
/// before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Evaluate the following resume for the target role of "{target_role}".

Return a JSON object with this EXACT schema (no extra fields):
{
  "atsScore": 72,
  "strengths": ["Quantified impact in most experience bullets"],
  "weakAreas": ["No professional summary section"],
  "missingSkills": ["Docker", "CI/CD pipelines"],
  "projectGaps": ["No project demonstrates API design end-to-end"],
  "quickFixes": ["Add links to deployed projects and repositories"],
  "summary": "Two to three sentence overall assessment."
}

Rules for the report:

SCORING:
- "atsScore" is an integer 0-100: how well this resume passes automated screening for the target role.
- Score against the TARGET ROLE, not resumes in general — a strong backend resume scores low for a data-science role.

LISTS:
- "strengths", "weakAreas", "missingSkills", "projectGaps", "quickFixes" each contain 3-6 short, specific items.
- "missingSkills" names skills expected for the target role that the resume does not show evidence of.
- "projectGaps" names the kinds of projects that would strengthen the application.
- "quickFixes" are edits the candidate can apply in under an hour.

SUMMARY:
- "summary" is 2-3 sentences, direct and concrete — no filler praise.

RESUME TEXT:
{resume_text}"#;
