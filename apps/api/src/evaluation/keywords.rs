//! Keyword extraction from raw job description text.

use std::collections::HashSet;

/// Words carrying no matching signal, dropped regardless of the
/// allowlist below.
const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "in", "on", "at", "to", "for", "with", "by", "is",
    "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does", "did", "of",
    "that", "this", "these", "those", "will", "would", "shall", "should", "can", "could", "may",
    "might", "must", "as", "we", "our", "you", "your", "they", "their", "he", "his", "she", "her",
    "from", "into", "about", "than", "then", "them", "what", "when", "where", "which", "while",
];

/// Domain terms kept even when the length/stopword filter would drop them.
const IMPORTANT_TERMS: &[&str] = &[
    "experience",
    "skill",
    "skills",
    "degree",
    "bachelor",
    "master",
    "phd",
    "education",
    "certification",
];

/// Extracts up to `cap` salient keywords from a job description.
///
/// Lowercases, strips punctuation to whitespace, keeps tokens that pass
/// the length/stopword filter or sit on the important-term allowlist, and
/// deduplicates preserving first-occurrence order. Pure and deterministic;
/// empty or all-stopword input yields an empty set.
pub fn extract_keywords(job_description: &str, cap: usize) -> Vec<String> {
    let lowered = job_description.to_lowercase();
    let cleaned: String = lowered
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    let mut seen = HashSet::new();
    let mut keywords = Vec::new();

    for token in cleaned.split_whitespace() {
        let generic = token.len() > 3 && !STOP_WORDS.contains(&token);
        let important = IMPORTANT_TERMS.contains(&token);
        if (generic || important) && seen.insert(token.to_string()) {
            keywords.push(token.to_string());
            if keywords.len() == cap {
                break;
            }
        }
    }

    keywords
}

/// Splits a keyword set by case-insensitive presence in the resume text.
/// The two returned lists are disjoint by construction.
pub fn split_by_presence(keywords: &[String], resume: &str) -> (Vec<String>, Vec<String>) {
    let resume_lower = resume.to_lowercase();
    let mut present = Vec::new();
    let mut missing = Vec::new();
    for keyword in keywords {
        if resume_lower.contains(keyword.as_str()) {
            present.push(keyword.clone());
        } else {
            missing.push(keyword.clone());
        }
    }
    (present, missing)
}
