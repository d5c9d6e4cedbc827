use std::sync::Arc;

use crate::config::Config;
use crate::evaluation::orchestrator::EvaluationOrchestrator;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Requests share nothing mutable; the orchestrator is read-only after
/// startup, so concurrent evaluations need no coordination.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<EvaluationOrchestrator>,
    pub config: Config,
}
