//! Years-of-experience extraction and requirement matching.

use regex::Regex;

/// Matches "N years" / "N yrs" mentions and compares resume experience
/// against the job description's requirement with a tolerance band.
pub struct ExperienceMatcher {
    pattern: Regex,
}

impl Default for ExperienceMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ExperienceMatcher {
    pub fn new() -> Self {
        let pattern = Regex::new(r"(?i)(\d+)\s*\+?\s*(?:years?|yrs?)\b")
            .expect("Invalid years pattern");
        Self { pattern }
    }

    /// The explicit years requirement of a job description, if any.
    /// When multiple mentions exist the maximum governs.
    pub fn required_years(&self, job_description: &str) -> Option<u32> {
        self.max_years(job_description)
    }

    /// Whether the resume satisfies the job description's requirement.
    ///
    /// No requirement in the JD means an unconditional match. A resume
    /// without any years mention counts as 0. `tolerance` is the fraction
    /// of the requirement the resume must reach (0.8 in production, so
    /// near-misses are not penalized).
    pub fn matches(&self, resume: &str, job_description: &str, tolerance: f64) -> bool {
        let Some(required) = self.required_years(job_description) else {
            return true;
        };
        let resume_years = self.max_years(resume).unwrap_or(0);
        f64::from(resume_years) >= f64::from(required) * tolerance
    }

    fn max_years(&self, text: &str) -> Option<u32> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| caps[1].parse::<u32>().ok())
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 0.8;

    #[test]
    fn test_required_years_takes_maximum_mention() {
        let matcher = ExperienceMatcher::new();
        let jd = "2 years with SQL, 5 years of Rust, 3 yrs cloud";
        assert_eq!(matcher.required_years(jd), Some(5));
    }

    #[test]
    fn test_no_mention_means_no_requirement() {
        let matcher = ExperienceMatcher::new();
        assert_eq!(matcher.required_years("Senior Rust Engineer"), None);
        assert!(matcher.matches("anything", "Senior Rust Engineer", TOLERANCE));
    }

    #[test]
    fn test_three_years_fails_five_year_requirement() {
        let matcher = ExperienceMatcher::new();
        // 3 < 5 * 0.8 = 4
        assert!(!matcher.matches(
            "3 years of backend work",
            "requires 5 years of experience",
            TOLERANCE
        ));
    }

    #[test]
    fn test_four_years_passes_five_year_requirement() {
        let matcher = ExperienceMatcher::new();
        // 4 >= 5 * 0.8 = 4
        assert!(matcher.matches(
            "4 years of backend work",
            "requires 5 years of experience",
            TOLERANCE
        ));
    }

    #[test]
    fn test_resume_without_mention_counts_as_zero() {
        let matcher = ExperienceMatcher::new();
        assert!(!matcher.matches(
            "Strong Rust background",
            "requires 2 years of experience",
            TOLERANCE
        ));
    }

    #[test]
    fn test_case_and_abbreviation_variants() {
        let matcher = ExperienceMatcher::new();
        assert_eq!(matcher.required_years("7 YEARS minimum"), Some(7));
        assert_eq!(matcher.required_years("at least 6 yrs"), Some(6));
        assert_eq!(matcher.required_years("1 year of exposure"), Some(1));
        assert_eq!(matcher.required_years("10+ years leading teams"), Some(10));
    }
}
