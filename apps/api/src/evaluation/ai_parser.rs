//! Tolerant parser for AI evaluation replies.
//!
//! The model is instructed to reply with a bare JSON object, but replies
//! routinely arrive wrapped in prose or fences, with trailing commas, or
//! with mangled arrays. Stages, each a fallback for the previous:
//! locate the object boundary, repair common damage, strict serde parse,
//! then per-field regex salvage. Once a boundary is found the parser
//! always returns a usable result; only a reply with no object at all
//! propagates as `NoJsonFound` so the caller can decide to retry upstream.

use regex::{Captures, Regex};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::evaluation::models::KeywordReport;

pub const DEFAULT_SCORE: f64 = 0.5;
pub const DEFAULT_FEEDBACK: &str = "We could not fully read the evaluation returned by the \
    AI service, so the score shown is a conservative estimate. Please run the evaluation \
    again for detailed feedback.";
pub const DEFAULT_SUGGESTIONS: &str = "We could not fully read the suggestions returned by \
    the AI service. Please run the evaluation again for tailored advice.";
const FALLBACK_KEYWORDS: &[&str] = &["technical-skills", "experience", "education"];

/// The one failure the parser is allowed to propagate: no JSON object
/// boundary exists anywhere in the reply.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("no JSON object found in AI response")]
pub struct NoJsonFound;

/// Parser output before the orchestrator attaches timing metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedAiEvaluation {
    pub score: f64,
    pub feedback: String,
    pub suggestions: String,
    pub keywords: KeywordReport,
    /// True when strict parsing failed and fields were recovered one by one.
    pub degraded: bool,
}

/// Strict-parse target. Every field optional so a reply missing fields
/// still parses; both historical keyword shapes are accepted.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEvaluation {
    score: Option<f64>,
    feedback: Option<String>,
    suggestions: Option<String>,
    keywords: Option<Vec<String>>,
    #[serde(alias = "present_keywords")]
    present_keywords: Option<Vec<String>>,
    #[serde(alias = "missing_keywords")]
    missing_keywords: Option<Vec<String>>,
}

/// Extracts a structured evaluation from arbitrary model output.
pub fn parse(raw: &str) -> Result<ParsedAiEvaluation, NoJsonFound> {
    let located = locate_object(raw).ok_or(NoJsonFound)?;
    let repaired = repair(located);

    match serde_json::from_str::<RawEvaluation>(&repaired) {
        Ok(value) => Ok(normalize(value)),
        Err(err) => {
            debug!("strict parse failed, salvaging fields: {err}");
            Ok(salvage(&repaired))
        }
    }
}

/// First `{` to last `}`. Deliberately not depth-aware: the reply carries
/// at most one object and prose never contains braces in practice.
fn locate_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

/// Repairs the two damage patterns the model actually produces: trailing
/// commas before a closing bracket, and keyword arrays with unquoted or
/// half-quoted elements.
fn repair(json: &str) -> String {
    let trailing_commas = Regex::new(r",\s*([}\]])").expect("Invalid trailing comma pattern");
    let stripped = trailing_commas.replace_all(json, "$1");

    let keyword_arrays = Regex::new(
        r#""((?:present_?|missing_?)?[Kk]eywords)"\s*:\s*\[([^\]]*)\]"#,
    )
    .expect("Invalid keyword array pattern");

    keyword_arrays
        .replace_all(&stripped, |caps: &Captures| {
            let items = split_array_items(&caps[2])
                .into_iter()
                .map(|item| format!("\"{}\"", escape_json(&item)))
                .collect::<Vec<_>>()
                .join(", ");
            format!("\"{}\": [{}]", &caps[1], items)
        })
        .into_owned()
}

/// Splits a raw array body on commas, trimming whitespace and surrounding
/// quote characters; empty elements are dropped.
fn split_array_items(body: &str) -> Vec<String> {
    body.split(',')
        .map(|item| {
            item.trim()
                .trim_matches(|c| c == '"' || c == '\'' || c == '`')
                .trim()
                .to_string()
        })
        .filter(|item| !item.is_empty())
        .collect()
}

fn escape_json(item: &str) -> String {
    item.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Normalizes a strict-parse success into the output contract, filling
/// absent fields with named defaults and enforcing the disjointness of
/// the split shape.
fn normalize(raw: RawEvaluation) -> ParsedAiEvaluation {
    let keywords = match (raw.keywords, raw.present_keywords, raw.missing_keywords) {
        (_, Some(present), missing) => {
            let mut missing = missing.unwrap_or_default();
            missing.retain(|keyword| !present.contains(keyword));
            KeywordReport::Split { present, missing }
        }
        (_, None, Some(missing)) => KeywordReport::Split {
            present: Vec::new(),
            missing,
        },
        (Some(combined), None, None) => KeywordReport::Combined(combined),
        (None, None, None) => KeywordReport::Combined(fallback_keywords()),
    };

    ParsedAiEvaluation {
        score: raw.score.unwrap_or(DEFAULT_SCORE).clamp(0.0, 1.0),
        feedback: raw
            .feedback
            .unwrap_or_else(|| DEFAULT_FEEDBACK.to_string()),
        suggestions: raw
            .suggestions
            .unwrap_or_else(|| DEFAULT_SUGGESTIONS.to_string()),
        keywords,
        degraded: false,
    }
}

/// Stage-4 fallback: recover each field independently with regexes; any
/// field not recoverable takes its named default.
fn salvage(body: &str) -> ParsedAiEvaluation {
    let score = salvage_number(body, "score")
        .unwrap_or(DEFAULT_SCORE)
        .clamp(0.0, 1.0);
    let feedback =
        salvage_string(body, "feedback").unwrap_or_else(|| DEFAULT_FEEDBACK.to_string());
    let suggestions =
        salvage_string(body, "suggestions").unwrap_or_else(|| DEFAULT_SUGGESTIONS.to_string());

    let present = salvage_array(body, "presentKeywords");
    let missing = salvage_array(body, "missingKeywords");
    let keywords = if present.is_some() || missing.is_some() {
        let present = present.unwrap_or_default();
        let mut missing = missing.unwrap_or_default();
        missing.retain(|keyword| !present.contains(keyword));
        KeywordReport::Split { present, missing }
    } else {
        KeywordReport::Combined(salvage_array(body, "keywords").unwrap_or_else(fallback_keywords))
    };

    ParsedAiEvaluation {
        score,
        feedback,
        suggestions,
        keywords,
        degraded: true,
    }
}

fn salvage_number(body: &str, key: &str) -> Option<f64> {
    let pattern = Regex::new(&format!(r#""{key}"\s*:\s*(-?\d+(?:\.\d+)?)"#))
        .expect("Invalid number salvage pattern");
    pattern.captures(body).and_then(|caps| caps[1].parse().ok())
}

/// Quoted string value, tolerant of embedded escaped quotes.
fn salvage_string(body: &str, key: &str) -> Option<String> {
    let pattern = Regex::new(&format!(r#""{key}"\s*:\s*"((?:[^"\\]|\\.)*)""#))
        .expect("Invalid string salvage pattern");
    pattern.captures(body).map(|caps| unescape(&caps[1]))
}

fn salvage_array(body: &str, key: &str) -> Option<Vec<String>> {
    let pattern = Regex::new(&format!(r#""{key}"\s*:\s*\[([^\]]*)\]"#))
        .expect("Invalid array salvage pattern");
    pattern
        .captures(body)
        .map(|caps| split_array_items(&caps[1]))
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn fallback_keywords() -> Vec<String> {
    FALLBACK_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_reply_parses_strictly() {
        let raw = r#"{"score": 0.7, "feedback": "ok", "suggestions": "x", "keywords": ["a", "b"]}"#;
        let parsed = parse(raw).unwrap();
        assert_eq!(parsed.score, 0.7);
        assert_eq!(parsed.feedback, "ok");
        assert_eq!(
            parsed.keywords,
            KeywordReport::Combined(vec!["a".to_string(), "b".to_string()])
        );
        assert!(!parsed.degraded);
    }

    #[test]
    fn test_noise_and_trailing_comma_tolerated() {
        let raw = "noise {\"score\": 0.7, \"feedback\": \"ok\", \"suggestions\": \"x\", \
                   \"keywords\": [\"a\", \"b\",]} trailing";
        let parsed = parse(raw).unwrap();
        assert_eq!(parsed.score, 0.7);
        assert_eq!(
            parsed.keywords,
            KeywordReport::Combined(vec!["a".to_string(), "b".to_string()])
        );
        assert!(!parsed.degraded);
    }

    #[test]
    fn test_no_braces_is_no_json_found() {
        assert_eq!(parse("I cannot help with that."), Err(NoJsonFound));
        assert_eq!(parse(""), Err(NoJsonFound));
    }

    #[test]
    fn test_reversed_braces_is_no_json_found() {
        assert_eq!(parse("} nothing here {"), Err(NoJsonFound));
    }

    #[test]
    fn test_unquoted_keyword_elements_repaired() {
        let raw = r#"{"score": 0.6, "feedback": "f", "suggestions": "s",
                      "keywords": [rust, tokio , "axum",]}"#;
        let parsed = parse(raw).unwrap();
        assert_eq!(
            parsed.keywords,
            KeywordReport::Combined(vec![
                "rust".to_string(),
                "tokio".to_string(),
                "axum".to_string()
            ])
        );
        assert!(!parsed.degraded);
    }

    #[test]
    fn test_split_shape_normalizes_and_stays_disjoint() {
        let raw = r#"{"score": 0.5, "feedback": "f", "suggestions": "s",
                      "presentKeywords": ["rust"], "missingKeywords": ["rust", "kafka"]}"#;
        let parsed = parse(raw).unwrap();
        assert_eq!(
            parsed.keywords,
            KeywordReport::Split {
                present: vec!["rust".to_string()],
                missing: vec!["kafka".to_string()],
            }
        );
    }

    #[test]
    fn test_snake_case_split_shape_accepted() {
        let raw = r#"{"score": 0.5, "feedback": "f", "suggestions": "s",
                      "present_keywords": ["rust"], "missing_keywords": ["kafka"]}"#;
        let parsed = parse(raw).unwrap();
        assert_eq!(
            parsed.keywords,
            KeywordReport::Split {
                present: vec!["rust".to_string()],
                missing: vec!["kafka".to_string()],
            }
        );
    }

    #[test]
    fn test_salvage_recovers_score_from_broken_body() {
        // Unbalanced inner quote makes the body unparseable as JSON.
        let raw = r#"{"score": 0.42, "feedback": "broken "quote, "suggestions": }"#;
        let parsed = parse(raw).unwrap();
        assert!(parsed.degraded);
        assert_eq!(parsed.score, 0.42);
        assert_eq!(parsed.suggestions, DEFAULT_SUGGESTIONS);
        assert_eq!(
            parsed.keywords,
            KeywordReport::Combined(fallback_keywords())
        );
    }

    #[test]
    fn test_salvage_string_tolerates_escaped_quotes() {
        let raw = r#"{"score": bad, "feedback": "she said \"hi\"", "suggestions": "s"}"#;
        let parsed = parse(raw).unwrap();
        assert!(parsed.degraded);
        assert_eq!(parsed.feedback, "she said \"hi\"");
        assert_eq!(parsed.score, DEFAULT_SCORE);
    }

    #[test]
    fn test_salvage_recovers_split_keywords() {
        let raw = r#"{"score": oops, "presentKeywords": ["rust", "axum"], "missingKeywords": ["k8s"]}"#;
        let parsed = parse(raw).unwrap();
        assert!(parsed.degraded);
        assert_eq!(
            parsed.keywords,
            KeywordReport::Split {
                present: vec!["rust".to_string(), "axum".to_string()],
                missing: vec!["k8s".to_string()],
            }
        );
    }

    #[test]
    fn test_missing_fields_take_named_defaults() {
        let parsed = parse("{}").unwrap();
        assert_eq!(parsed.score, DEFAULT_SCORE);
        assert_eq!(parsed.feedback, DEFAULT_FEEDBACK);
        assert_eq!(parsed.suggestions, DEFAULT_SUGGESTIONS);
        assert_eq!(
            parsed.keywords,
            KeywordReport::Combined(fallback_keywords())
        );
        assert!(!parsed.degraded);
    }

    #[test]
    fn test_out_of_range_score_clamped() {
        let raw = r#"{"score": 7.5, "feedback": "f", "suggestions": "s", "keywords": []}"#;
        let parsed = parse(raw).unwrap();
        assert_eq!(parsed.score, 1.0);
    }

    #[test]
    fn test_fenced_reply_still_locates_object() {
        let raw = "```json\n{\"score\": 0.65, \"feedback\": \"f\", \"suggestions\": \"s\", \
                   \"keywords\": [\"a\"]}\n```";
        let parsed = parse(raw).unwrap();
        assert_eq!(parsed.score, 0.65);
        assert!(!parsed.degraded);
    }
}
