//! Heuristic preterite/imperfect detection.
//!
//! Tokens are scanned left to right. For each token the irregular table is
//! consulted first, then imperfect endings, then preterite endings; the first
//! token that matches any rule decides the tense of the whole sentence.
//! Nouns that happen to end in "-ía" and similar false positives are accepted.

use serde::Serialize;

use crate::model::Tense;

/// Irregular past-tense forms that suffix matching would miss or misfile.
pub const IRREGULAR_FORMS: &[(&str, Tense)] = &[
    ("era", Tense::Imperfect),
    ("eras", Tense::Imperfect),
    ("éramos", Tense::Imperfect),
    ("eran", Tense::Imperfect),
    ("iba", Tense::Imperfect),
    ("ibas", Tense::Imperfect),
    ("iban", Tense::Imperfect),
    ("veía", Tense::Imperfect),
    ("veían", Tense::Imperfect),
    ("fue", Tense::Preterite),
    ("fueron", Tense::Preterite),
    ("estuvo", Tense::Preterite),
    ("tuvo", Tense::Preterite),
    ("hizo", Tense::Preterite),
    ("dijo", Tense::Preterite),
];

/// Regular imperfect endings (-ar and -er/-ir verbs).
pub const IMPERFECT_SUFFIXES: &[&str] = &["aba", "abas", "ábamos", "aban", "ía", "ías", "íamos", "ían"];

/// Regular preterite endings (-ar and -er/-ir verbs).
pub const PRETERITE_SUFFIXES: &[&str] = &[
    "é", "aste", "ó", "amos", "aron", "í", "iste", "ió", "imos", "ieron",
];

/// Which rule classified a sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TenseRule {
    Irregular,
    ImperfectSuffix,
    PreteriteSuffix,
}

/// The token and rule that decided a sentence's tense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenseMatch {
    pub tense: Tense,
    pub token: String,
    pub rule: TenseRule,
}

/// Classify a token sequence as preterite, imperfect, or unknown.
pub fn detect(tokens: &[String]) -> Tense {
    detect_with_evidence(tokens).map_or(Tense::Unknown, |m| m.tense)
}

/// Like [`detect`], but also reports which token matched and why.
pub fn detect_with_evidence(tokens: &[String]) -> Option<TenseMatch> {
    tokens.iter().find_map(|token| {
        classify_token(token).map(|(tense, rule)| TenseMatch {
            tense,
            token: token.clone(),
            rule,
        })
    })
}

fn classify_token(token: &str) -> Option<(Tense, TenseRule)> {
    if let Some((_, tense)) = IRREGULAR_FORMS.iter().find(|(form, _)| *form == token) {
        return Some((*tense, TenseRule::Irregular));
    }
    if IMPERFECT_SUFFIXES.iter().any(|s| token.ends_with(s)) {
        return Some((Tense::Imperfect, TenseRule::ImperfectSuffix));
    }
    if PRETERITE_SUFFIXES.iter().any(|s| token.ends_with(s)) {
        return Some((Tense::Preterite, TenseRule::PreteriteSuffix));
    }
    None
}
