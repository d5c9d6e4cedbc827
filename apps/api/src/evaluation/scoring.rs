//! Composite heuristic scoring for the local evaluation path.

use std::sync::Arc;

use rand::Rng;

use crate::evaluation::experience::ExperienceMatcher;

/// Terms that signal formal education when present in both documents.
const EDUCATION_TERMS: &[&str] = &[
    "bachelor",
    "master",
    "phd",
    "degree",
    "diploma",
    "university",
    "college",
    "certification",
];

/// Section-header synonyms that mark a dedicated skills section.
const SKILLS_SECTION_TERMS: &[&str] = &["skills", "expertise", "proficiency", "proficiencies"];

/// True when the (lowercased) resume carries any skills-section synonym.
pub(crate) fn has_skills_section(resume_lower: &str) -> bool {
    SKILLS_SECTION_TERMS
        .iter()
        .any(|term| resume_lower.contains(term))
}

/// Tunable constants of the heuristic path.
///
/// Defaults carry the observed production values. They are calibration
/// data with no stated derivation; do not retune them without re-baselining
/// the score-band copy that branches on the result.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub keyword_weight: f64,
    pub education_weight: f64,
    pub experience_weight: f64,
    pub skills_section_weight: f64,
    pub length_weight: f64,
    /// Fraction of the required years a resume must reach to count as a match.
    pub experience_tolerance: f64,
    pub score_floor: f64,
    pub score_ceiling: f64,
    /// Amplitude of the uniform perturbation added to the composite.
    pub perturbation: f64,
    /// Resume length (chars) treated as fully adequate.
    pub target_length: usize,
    pub keyword_cap: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            keyword_weight: 0.5,
            education_weight: 0.15,
            experience_weight: 0.15,
            skills_section_weight: 0.10,
            length_weight: 0.10,
            experience_tolerance: 0.8,
            score_floor: 0.3,
            score_ceiling: 0.95,
            perturbation: 0.1,
            target_length: 3000,
            keyword_cap: 15,
        }
    }
}

/// Injectable randomness for the perturbation term, so tests can pin the
/// score exactly.
pub trait PerturbationSource: Send + Sync {
    /// Uniform float in `[lo, hi)`.
    fn next_in_range(&self, lo: f64, hi: f64) -> f64;
}

/// Production source backed by the thread-local RNG.
pub struct ThreadRngPerturbation;

impl PerturbationSource for ThreadRngPerturbation {
    fn next_in_range(&self, lo: f64, hi: f64) -> f64 {
        rand::thread_rng().gen_range(lo..hi)
    }
}

/// Deterministic source for tests: always returns its fixed value.
#[cfg(test)]
pub struct FixedPerturbation(pub f64);

#[cfg(test)]
impl PerturbationSource for FixedPerturbation {
    fn next_in_range(&self, _lo: f64, _hi: f64) -> f64 {
        self.0
    }
}

/// Combines keyword, education, experience, structure, and length signals
/// into a single bounded score.
pub struct ScoringEngine {
    config: ScoringConfig,
    perturbation: Arc<dyn PerturbationSource>,
    experience: ExperienceMatcher,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig, perturbation: Arc<dyn PerturbationSource>) -> Self {
        Self {
            config,
            perturbation,
            experience: ExperienceMatcher::new(),
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Weighted composite over the five signals plus a bounded perturbation,
    /// clamped to `[score_floor, score_ceiling]`. The clamp keeps results
    /// away from the hard 0/1 bounds so score-band copy always has room to
    /// express nuance.
    pub fn score(&self, resume: &str, job_description: &str, keywords: &[String]) -> f64 {
        let resume_lower = resume.to_lowercase();
        let jd_lower = job_description.to_lowercase();

        // An empty keyword set is "no signal", not a zero: the rate term
        // defaults to neutral instead of dividing by zero.
        let keyword_rate = if keywords.is_empty() {
            1.0
        } else {
            let matched = keywords
                .iter()
                .filter(|keyword| resume_lower.contains(keyword.as_str()))
                .count();
            matched as f64 / keywords.len() as f64
        };

        let education = EDUCATION_TERMS
            .iter()
            .any(|term| resume_lower.contains(term) && jd_lower.contains(term));

        let experience =
            self.experience
                .matches(resume, job_description, self.config.experience_tolerance);

        let skills_section = has_skills_section(&resume_lower);

        let length = (resume.len() as f64 / self.config.target_length as f64).min(1.0);

        let composite = self.config.keyword_weight * keyword_rate
            + self.config.education_weight * signal(education)
            + self.config.experience_weight * signal(experience)
            + self.config.skills_section_weight * signal(skills_section)
            + self.config.length_weight * length;

        let jitter = self
            .perturbation
            .next_in_range(-self.config.perturbation, self.config.perturbation);

        (composite + jitter).clamp(self.config.score_floor, self.config.score_ceiling)
    }
}

fn signal(present: bool) -> f64 {
    if present {
        1.0
    } else {
        0.0
    }
}
