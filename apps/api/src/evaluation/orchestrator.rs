//! Strategy selection and result assembly for evaluation requests.
//!
//! Two backends implement the same `EvaluationBackend` trait: the local
//! heuristic (synchronous, cannot fail past validation) and the AI path
//! (one upstream call, tolerant parse). Both produce the same Evaluation
//! contract, so callers never branch on strategy.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::evaluation::ai_parser;
use crate::evaluation::feedback::feedback_for_score;
use crate::evaluation::keywords::{extract_keywords, split_by_presence};
use crate::evaluation::models::{Evaluation, KeywordReport};
use crate::evaluation::prompts::{EVALUATION_PROMPT_TEMPLATE, EVALUATION_SYSTEM};
use crate::evaluation::scoring::{PerturbationSource, ScoringConfig, ScoringEngine};
use crate::evaluation::suggestions::suggestions_for;
use crate::llm_client::LlmClient;

/// Which evaluation path to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationStrategy {
    #[default]
    Heuristic,
    Ai,
}

/// One evaluation backend. Implement this to add a strategy without
/// touching the endpoint, handler, or orchestrator dispatch.
#[async_trait]
pub trait EvaluationBackend: Send + Sync {
    async fn evaluate(&self, resume: &str, job_description: &str)
        -> Result<Evaluation, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// HeuristicEvaluator — deterministic local path
// ────────────────────────────────────────────────────────────────────────────

/// Pure-Rust scoring path: keyword extraction, composite scoring, and
/// templated feedback/suggestions. No I/O, no failure mode.
pub struct HeuristicEvaluator {
    scoring: ScoringEngine,
}

impl HeuristicEvaluator {
    pub fn new(config: ScoringConfig, perturbation: Arc<dyn PerturbationSource>) -> Self {
        Self {
            scoring: ScoringEngine::new(config, perturbation),
        }
    }
}

#[async_trait]
impl EvaluationBackend for HeuristicEvaluator {
    async fn evaluate(
        &self,
        resume: &str,
        job_description: &str,
    ) -> Result<Evaluation, AppError> {
        let keywords = extract_keywords(job_description, self.scoring.config().keyword_cap);
        let score = self.scoring.score(resume, job_description, &keywords);
        debug!(score, keyword_count = keywords.len(), "heuristic evaluation");

        let suggestions = suggestions_for(score, &keywords, resume);
        let (present, missing) = split_by_presence(&keywords, resume);

        Ok(Evaluation {
            score,
            feedback: feedback_for_score(score).to_string(),
            suggestions,
            keywords: KeywordReport::Split { present, missing },
            ai_timestamp: None,
            response_time: None,
            degraded: false,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// AiEvaluator — delegated path through the LLM client
// ────────────────────────────────────────────────────────────────────────────

/// Delegates to the external model and coerces its free-form reply into
/// the Evaluation contract. Transport/auth failure and a reply with no
/// JSON object both surface as `AppError::Service`; a degraded parse does
/// not fail the request.
pub struct AiEvaluator {
    llm: LlmClient,
}

impl AiEvaluator {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl EvaluationBackend for AiEvaluator {
    async fn evaluate(
        &self,
        resume: &str,
        job_description: &str,
    ) -> Result<Evaluation, AppError> {
        let prompt = EVALUATION_PROMPT_TEMPLATE
            .replace("{job_description}", job_description)
            .replace("{resume}", resume);

        let started = Instant::now();
        let response = self
            .llm
            .call(&prompt, EVALUATION_SYSTEM)
            .await
            .map_err(|e| AppError::Service {
                message: "AI evaluation call failed".to_string(),
                details: e.to_string(),
            })?;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let text = response.text().ok_or_else(|| AppError::Service {
            message: "AI evaluation call failed".to_string(),
            details: "response contained no text content".to_string(),
        })?;

        let parsed = ai_parser::parse(text).map_err(|e| AppError::Service {
            message: "AI response could not be interpreted".to_string(),
            details: e.to_string(),
        })?;

        if parsed.degraded {
            warn!("AI response required field salvage; returning degraded evaluation");
        }

        Ok(Evaluation {
            score: parsed.score,
            feedback: parsed.feedback,
            suggestions: parsed.suggestions,
            keywords: parsed.keywords,
            ai_timestamp: Some(Utc::now()),
            response_time: Some(elapsed_ms),
            degraded: parsed.degraded,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Orchestrator
// ────────────────────────────────────────────────────────────────────────────

/// Validates input and dispatches to the selected backend.
pub struct EvaluationOrchestrator {
    heuristic: HeuristicEvaluator,
    ai: AiEvaluator,
}

impl EvaluationOrchestrator {
    pub fn new(
        llm: LlmClient,
        config: ScoringConfig,
        perturbation: Arc<dyn PerturbationSource>,
    ) -> Self {
        Self {
            heuristic: HeuristicEvaluator::new(config, perturbation),
            ai: AiEvaluator::new(llm),
        }
    }

    pub async fn evaluate(
        &self,
        resume: &str,
        job_description: &str,
        strategy: EvaluationStrategy,
    ) -> Result<Evaluation, AppError> {
        if resume.trim().is_empty() {
            return Err(AppError::Validation("resume cannot be empty".to_string()));
        }
        if job_description.trim().is_empty() {
            return Err(AppError::Validation(
                "jobDescription cannot be empty".to_string(),
            ));
        }

        let backend: &dyn EvaluationBackend = match strategy {
            EvaluationStrategy::Heuristic => &self.heuristic,
            EvaluationStrategy::Ai => &self.ai,
        };

        backend.evaluate(resume, job_description).await
    }
}
