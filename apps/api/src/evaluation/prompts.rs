// All LLM prompt constants for the Evaluation module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for resume evaluation — enforces JSON-only output.
pub const EVALUATION_SYSTEM: &str =
    "You are an expert resume reviewer and hiring consultant. \
    Evaluate how well a resume matches a job description. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Evaluation prompt template. Replace `{job_description}` and `{resume}`
/// before sending. Requests the split keyword shape; the response parser
/// also accepts the legacy combined `keywords` list.
pub const EVALUATION_PROMPT_TEMPLATE: &str = r#"Evaluate how well the resume below matches the job description.

Return a JSON object with this EXACT schema (no extra fields):
{
  "score": 0.72,
  "feedback": "Two to four sentences on overall alignment.",
  "suggestions": "Numbered, actionable advice items separated by blank lines.",
  "presentKeywords": ["rust", "distributed systems"],
  "missingKeywords": ["kubernetes"]
}

Rules:
- "score" is a float between 0 and 1.
- "presentKeywords" are job description keywords found in the resume;
  "missingKeywords" are those absent. The two lists must not overlap.
- Keep feedback concrete and tied to the job description's requirements.
- Suggestions must be actionable edits the candidate can make today.

JOB DESCRIPTION:
{job_description}

RESUME:
{resume}"#;
