//! Axum route handlers for the Evaluation API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::evaluation::models::Evaluation;
use crate::evaluation::orchestrator::EvaluationStrategy;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRequest {
    /// Defaults keep absent fields as empty strings so they surface as a
    /// 400 validation error rather than a deserialization failure.
    #[serde(default)]
    pub resume: String,
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub strategy: EvaluationStrategy,
}

/// POST /api/v1/evaluate
///
/// Scores a resume against a job description with the requested strategy
/// and returns the Evaluation contract shared by both paths.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<Evaluation>, AppError> {
    let evaluation = state
        .orchestrator
        .evaluate(&request.resume, &request.job_description, request.strategy)
        .await?;

    Ok(Json(evaluation))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_accepts_camel_case_fields() {
        let request: EvaluateRequest = serde_json::from_str(
            r#"{"resume": "r", "jobDescription": "jd", "strategy": "ai"}"#,
        )
        .unwrap();
        assert_eq!(request.resume, "r");
        assert_eq!(request.job_description, "jd");
        assert_eq!(request.strategy, EvaluationStrategy::Ai);
    }

    #[test]
    fn test_absent_fields_default_instead_of_failing() {
        let request: EvaluateRequest = serde_json::from_str("{}").unwrap();
        assert!(request.resume.is_empty());
        assert!(request.job_description.is_empty());
        assert_eq!(request.strategy, EvaluationStrategy::Heuristic);
    }
}
