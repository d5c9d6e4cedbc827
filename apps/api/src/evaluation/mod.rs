// Resume evaluation engine.
// Implements: keyword extraction, experience matching, composite scoring,
// feedback/suggestion templating, AI response parsing, and orchestration.
// All LLM calls go through llm_client — no direct API calls here.

pub mod ai_parser;
pub mod experience;
pub mod feedback;
pub mod handlers;
pub mod keywords;
pub mod models;
pub mod orchestrator;
pub mod prompts;
pub mod scoring;
pub mod suggestions;
