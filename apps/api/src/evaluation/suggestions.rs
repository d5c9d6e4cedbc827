//! Conditionally assembled, numbered improvement advice.

use crate::evaluation::keywords::split_by_presence;
use crate::evaluation::scoring::has_skills_section;

/// Builds the numbered suggestion list for a scored resume.
///
/// Slots keep fixed numbers; a slot whose condition does not hold simply
/// skips its number. Items are joined with blank lines.
pub fn suggestions_for(score: f64, keywords: &[String], resume: &str) -> String {
    let resume_lower = resume.to_lowercase();
    let (_, missing) = split_by_presence(keywords, resume);

    let mut items: Vec<String> = Vec::new();

    if !missing.is_empty() {
        items.push(format!(
            "1. Consider adding these important keywords to your resume: {}.",
            missing.join(", ")
        ));
    }

    if score < 0.7 {
        items.push(
            "2. Restructure your experience section to prioritize achievements that are \
             most relevant to this position."
                .to_string(),
        );
        items.push(
            "3. Add measurable accomplishments with metrics to demonstrate impact in \
             relevant areas."
                .to_string(),
        );
    }

    items.push(
        "4. Tailor your professional summary to directly address the main requirements \
         of this role."
            .to_string(),
    );

    if !has_skills_section(&resume_lower) {
        items.push(
            "5. Add a dedicated skills section so reviewers can find your core \
             competencies at a glance."
                .to_string(),
        );
    }

    if resume.len() < 2000 {
        items.push(
            "6. Your resume appears brief. Consider adding more detail about projects \
             and experiences that relate to this position."
                .to_string(),
        );
    } else if resume.len() > 5000 {
        items.push(
            "6. Focus on refining the language to be more concise while maintaining the \
             important details."
                .to_string(),
        );
    }

    items.push(
        "7. Open each bullet point with a strong action verb that describes your \
         contribution."
            .to_string(),
    );

    if score < 0.5 {
        items.push(
            "8. Reformat the document with consistent headings and spacing so applicant \
             tracking systems can parse it cleanly."
                .to_string(),
        );
    } else {
        items.push(
            "8. Proofread carefully for typos and inconsistent tense before submitting."
                .to_string(),
        );
    }

    items.join("\n\n")
}
