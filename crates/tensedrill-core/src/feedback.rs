//! Learner-facing feedback messages.

use crate::model::{JudgmentOutcome, Tense};

/// Shown when an outcome cannot be interpreted.
pub const UNABLE_TO_EVALUATE: &str = "Unable to evaluate this sentence.";

/// Render the message for a judged answer.
///
/// `reference` is only quoted for incorrect answers. `reference_tense` picks
/// the wording of a tense mismatch.
pub fn render(outcome: JudgmentOutcome, reference: &str, reference_tense: Tense) -> String {
    match outcome {
        JudgmentOutcome::Perfect => "Correct! Nice work.".to_string(),
        JudgmentOutcome::CorrectDifferentPhrasing => {
            "Correct meaning. Your phrasing is different, but it works.".to_string()
        }
        JudgmentOutcome::TenseMismatch => match reference_tense.opposite() {
            Some(wrong) => format!(
                "Good translation, but this sentence uses the {reference_tense}, not the {wrong}."
            ),
            None => "Good translation, but the tense could not be evaluated.".to_string(),
        },
        JudgmentOutcome::Incorrect => format!("Not quite. Suggested translation: {reference}"),
    }
}

/// Render from a textual outcome tag, falling back to a generic message for
/// tags that name no known outcome.
pub fn render_tag(tag: &str, reference: &str, reference_tense: Tense) -> String {
    match tag.parse::<JudgmentOutcome>() {
        Ok(outcome) => render(outcome, reference, reference_tense),
        Err(_) => UNABLE_TO_EVALUATE.to_string(),
    }
}
