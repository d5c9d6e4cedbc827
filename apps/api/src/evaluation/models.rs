#![allow(dead_code)]

//! Output data models shared by both evaluation strategies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Keyword signal attached to an evaluation.
///
/// Two response shapes exist historically: a single combined list, and a
/// present/missing split. Untagged so either shape round-trips through the
/// wire form it was produced in; callers never branch on strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeywordReport {
    Combined(Vec<String>),
    Split {
        present: Vec<String>,
        missing: Vec<String>,
    },
}

impl KeywordReport {
    /// Total keyword count across whichever shape is carried.
    pub fn len(&self) -> usize {
        match self {
            KeywordReport::Combined(list) => list.len(),
            KeywordReport::Split { present, missing } => present.len() + missing.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The single result contract of an evaluation request.
///
/// Created fresh per request and never mutated after construction.
/// Timing metadata is present only on the AI path; `degraded` is true when
/// the AI reply needed per-field salvage (lower confidence, never an error).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub score: f64,
    pub feedback: String,
    pub suggestions: String,
    pub keywords: KeywordReport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_timestamp: Option<DateTime<Utc>>,
    /// Upstream AI call latency in milliseconds (`responseTime` on the wire).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time: Option<u64>,
    #[serde(default)]
    pub degraded: bool,
}
