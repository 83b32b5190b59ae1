//! Core data model types for tensedrill.
//!
//! Sentence entries are read-only once loaded. Token sequences, tenses and
//! outcomes are transient and live for a single drill round.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordered, lowercase word tokens extracted from a sentence.
pub type TokenSequence = Vec<String>;

/// A single prompt from the sentence bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceEntry {
    /// The English sentence shown to the learner.
    pub english: String,
    /// A curated Spanish translation, if the corpus provides one.
    #[serde(default)]
    pub spanish: Option<String>,
}

/// Past tenses the detector can distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tense {
    Preterite,
    Imperfect,
    Unknown,
}

impl Tense {
    /// The other past tense, used when telling the learner which one was wrong.
    pub fn opposite(self) -> Option<Tense> {
        match self {
            Tense::Preterite => Some(Tense::Imperfect),
            Tense::Imperfect => Some(Tense::Preterite),
            Tense::Unknown => None,
        }
    }
}

impl fmt::Display for Tense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tense::Preterite => write!(f, "preterite"),
            Tense::Imperfect => write!(f, "imperfect"),
            Tense::Unknown => write!(f, "unknown"),
        }
    }
}

impl FromStr for Tense {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "preterite" | "preterito" | "pretérito" | "0" => Ok(Tense::Preterite),
            "imperfect" | "imperfecto" | "1" => Ok(Tense::Imperfect),
            "unknown" => Ok(Tense::Unknown),
            other => Err(format!("unknown tense: {other}")),
        }
    }
}

/// Classification of a learner's answer against the reference translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JudgmentOutcome {
    Perfect,
    CorrectDifferentPhrasing,
    TenseMismatch,
    Incorrect,
}

impl JudgmentOutcome {
    /// All outcomes in display order.
    pub const ALL: [JudgmentOutcome; 4] = [
        JudgmentOutcome::Perfect,
        JudgmentOutcome::CorrectDifferentPhrasing,
        JudgmentOutcome::TenseMismatch,
        JudgmentOutcome::Incorrect,
    ];

    /// Whether the answer conveys the right meaning in the right tense.
    pub fn is_accepted(self) -> bool {
        matches!(
            self,
            JudgmentOutcome::Perfect | JudgmentOutcome::CorrectDifferentPhrasing
        )
    }
}

impl fmt::Display for JudgmentOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JudgmentOutcome::Perfect => write!(f, "perfect"),
            JudgmentOutcome::CorrectDifferentPhrasing => write!(f, "correct_different_phrasing"),
            JudgmentOutcome::TenseMismatch => write!(f, "tense_mismatch"),
            JudgmentOutcome::Incorrect => write!(f, "incorrect"),
        }
    }
}

impl FromStr for JudgmentOutcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "perfect" => Ok(JudgmentOutcome::Perfect),
            "correct_different_phrasing" => Ok(JudgmentOutcome::CorrectDifferentPhrasing),
            "tense_mismatch" => Ok(JudgmentOutcome::TenseMismatch),
            "incorrect" => Ok(JudgmentOutcome::Incorrect),
            other => Err(format!("unknown outcome: {other}")),
        }
    }
}
