//! Sentence normalization.
//!
//! Turns free text into lowercase word tokens with punctuation removed.
//! Accented letters count as word characters, so "caminé" survives intact
//! while "¡" and "¿" are dropped.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::DrillError;
use crate::model::TokenSequence;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("punctuation pattern is valid"));

/// Normalize a sentence into tokens.
///
/// Empty or punctuation-only input yields an empty sequence.
pub fn normalize(text: &str) -> TokenSequence {
    let lowered = text.to_lowercase();
    let stripped = NON_WORD.replace_all(&lowered, "");
    stripped.split_whitespace().map(str::to_string).collect()
}

/// Normalize a reference translation, refusing to work on a missing or
/// blank one.
pub fn normalize_reference(reference: Option<&str>) -> Result<TokenSequence, DrillError> {
    reference
        .filter(|text| !text.trim().is_empty())
        .map(normalize)
        .ok_or(DrillError::ReferenceUnavailable)
}

/// Join tokens back into a single space-separated string.
pub fn display(tokens: &[String]) -> String {
    tokens.join(" ")
}
