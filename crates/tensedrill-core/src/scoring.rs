//! Word-overlap scoring and answer judgment.

use std::collections::HashSet;

use crate::model::{JudgmentOutcome, Tense};

/// Minimum overlap for an answer to count as conveying the right meaning.
pub const OVERLAP_THRESHOLD: f64 = 0.6;

/// Fraction of the reference's distinct words that also appear in `candidate`.
///
/// Deliberately asymmetric: extra words in the candidate cost nothing. An
/// empty reference scores `0.0`.
pub fn overlap(candidate: &[String], reference: &[String]) -> f64 {
    let reference: HashSet<&str> = reference.iter().map(String::as_str).collect();
    if reference.is_empty() {
        return 0.0;
    }
    let candidate: HashSet<&str> = candidate.iter().map(String::as_str).collect();
    let shared = reference.intersection(&candidate).count();
    shared as f64 / reference.len() as f64
}

/// Classify an answer. Rules are applied in order and the first match wins:
/// exact token equality, then overlap with tense agreement, then incorrect.
pub fn judge(
    user_tokens: &[String],
    reference_tokens: &[String],
    user_tense: Tense,
    reference_tense: Tense,
) -> JudgmentOutcome {
    if user_tokens == reference_tokens {
        return JudgmentOutcome::Perfect;
    }

    if overlap(user_tokens, reference_tokens) >= OVERLAP_THRESHOLD {
        if user_tense == reference_tense {
            JudgmentOutcome::CorrectDifferentPhrasing
        } else {
            JudgmentOutcome::TenseMismatch
        }
    } else {
        JudgmentOutcome::Incorrect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn overlap_is_relative_to_reference() {
        let user = words("estaba caminando");
        let reference = words("estaba caminando a la tienda");
        assert!((overlap(&user, &reference) - 0.4).abs() < 1e-9);
        assert!((overlap(&reference, &user) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn overlap_ignores_duplicates_and_order() {
        let user = words("tienda la la a tienda");
        let reference = words("a la tienda");
        assert!((overlap(&user, &reference) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn overlap_with_empty_reference_is_zero() {
        assert_eq!(overlap(&words("hola mundo"), &[]), 0.0);
        assert_eq!(overlap(&[], &[]), 0.0);
    }

    #[test]
    fn overlap_stays_in_bounds() {
        let cases = [
            ("", "a"),
            ("a b c d", "a"),
            ("x y", "a b c"),
            ("a a a", "a b b"),
        ];
        for (a, b) in cases {
            let score = overlap(&words(a), &words(b));
            assert!((0.0..=1.0).contains(&score), "{a:?} vs {b:?} gave {score}");
        }
    }

    #[test]
    fn identical_tokens_are_perfect_regardless_of_tense() {
        let tokens = words("estaba caminando");
        for user in [Tense::Preterite, Tense::Imperfect, Tense::Unknown] {
            for reference in [Tense::Preterite, Tense::Imperfect, Tense::Unknown] {
                assert_eq!(
                    judge(&tokens, &tokens, user, reference),
                    JudgmentOutcome::Perfect
                );
            }
        }
        assert_eq!(
            judge(&[], &[], Tense::Unknown, Tense::Unknown),
            JudgmentOutcome::Perfect
        );
    }

    #[test]
    fn word_order_matters_for_perfect() {
        let result = judge(
            &words("caminando estaba"),
            &words("estaba caminando"),
            Tense::Imperfect,
            Tense::Imperfect,
        );
        assert_eq!(result, JudgmentOutcome::CorrectDifferentPhrasing);
    }

    #[test]
    fn threshold_boundary() {
        // 3 of 5 reference words: exactly 0.6.
        let user = words("caminé a la tienda");
        let reference = words("estaba caminando a la tienda");

        assert_eq!(
            judge(&user, &reference, Tense::Imperfect, Tense::Imperfect),
            JudgmentOutcome::CorrectDifferentPhrasing
        );
        assert_eq!(
            judge(&user, &reference, Tense::Preterite, Tense::Imperfect),
            JudgmentOutcome::TenseMismatch
        );
    }

    #[test]
    fn below_threshold_is_incorrect_regardless_of_tense() {
        // 2 of 5 reference words.
        let user = words("caminaba a tienda");
        let reference = words("estaba caminando a la tienda");
        assert_eq!(
            judge(&user, &reference, Tense::Imperfect, Tense::Imperfect),
            JudgmentOutcome::Incorrect
        );

        // 5 of 9: just under 0.6.
        let reference = words("a b c d e f g h i");
        let user = words("a b c d e");
        assert!(overlap(&user, &reference) < OVERLAP_THRESHOLD);
        assert_eq!(
            judge(&user, &reference, Tense::Preterite, Tense::Preterite),
            JudgmentOutcome::Incorrect
        );
    }

    #[test]
    fn unrelated_answer_is_incorrect() {
        assert_eq!(
            judge(
                &words("perro azul"),
                &words("estaba caminando"),
                Tense::Unknown,
                Tense::Imperfect
            ),
            JudgmentOutcome::Incorrect
        );
    }
}
