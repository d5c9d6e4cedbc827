//! Score-band narrative feedback.

/// Ordered (lower bound, narrative) table; the first band whose lower
/// bound the score exceeds wins. Adding a band is a data change.
const FEEDBACK_BANDS: &[(f64, &str)] = &[
    (
        0.8,
        "Your resume is well-aligned with the job description. You've included many of the \
         key skills and qualifications the employer is looking for. The document is \
         well-structured and effectively communicates your relevant experience.",
    ),
    (
        0.6,
        "Your resume shows good potential for this position. While you have included some \
         important keywords, there are areas where you could better highlight specific \
         skills and experiences mentioned in the job listing.",
    ),
    (
        0.4,
        "Your resume could benefit from a significant revision to better match this job \
         description. Many of the key skills and qualifications mentioned in the job \
         listing are not clearly represented in your resume.",
    ),
    (
        0.0,
        "Your resume currently shows little overlap with this job description. Consider \
         rewriting it around the role's core requirements, leading with the skills and \
         experience the listing asks for, before applying.",
    ),
];

/// Pure band lookup: the same score always yields the same text.
pub fn feedback_for_score(score: f64) -> &'static str {
    FEEDBACK_BANDS
        .iter()
        .find(|(bound, _)| score > *bound)
        .map(|(_, text)| *text)
        .unwrap_or(FEEDBACK_BANDS[FEEDBACK_BANDS.len() - 1].1)
}
