//! Answer scoring.
//!
//! Each answer earns at most one point, judged against the reference answer
//! embedded in its question:
//! - `exact`: trimmed response equals trimmed reference (case-sensitive)
//! - `keyword`: lower-cased reference is a substring of the lower-cased response
//! - anything else, including a missing question or type: no point
//!
//! The final score is points / answers scaled to 0–10 with one decimal place.

use super::models::{Answer, QuestionType, MAX_SCORE};

/// Scores an ordered answer sheet. Empty sheets score 0.
pub fn score_answers(answers: &[Answer]) -> f64 {
    let points = answers.iter().filter(|a| earns_point(a)).count();
    scaled_score(points, answers.len())
}

/// Whether a single answer earns its point.
pub fn earns_point(answer: &Answer) -> bool {
    let Some(question) = &answer.question_obj else {
        return false;
    };
    match question.kind {
        Some(QuestionType::Exact) => answer.answer.trim() == question.answer.trim(),
        Some(QuestionType::Keyword) => answer
            .answer
            .to_lowercase()
            .contains(&question.answer.to_lowercase()),
        Some(QuestionType::Ungraded) | None => false,
    }
}

/// points / total * 10, rounded to one decimal.
///
/// Rounding works from the exact binary value of the quotient, the same way
/// the scores already on file were produced. 1 of 200 is stored as
/// 0.05000000000000000277 and so rounds up to 0.1.
fn scaled_score(points: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = points as f64 / total as f64 * MAX_SCORE;
    round_tenths(raw)
}

/// `{:.1}` formatting is correctly rounded, so reparsing it gives the nearest
/// tenth of the value actually held.
fn round_tenths(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}
