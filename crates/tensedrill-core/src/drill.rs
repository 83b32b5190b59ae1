//! Drill round orchestration.
//!
//! A round is: pick an English prompt, take the learner's answer, fetch a
//! reference translation, then normalize, detect tenses, judge and render
//! feedback. Everything after the fetch is pure and repeatable.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::instrument;

use crate::corpus::Corpus;
use crate::error::DrillError;
use crate::feedback;
use crate::model::{JudgmentOutcome, SentenceEntry, Tense};
use crate::normalize::{normalize, normalize_reference};
use crate::scoring::{judge, overlap};
use crate::tense::{detect_with_evidence, TenseMatch};
use crate::traits::{fetch_reference, Translator};

/// Everything the presentation layer needs to show after a round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundReport {
    /// The English prompt.
    pub english: String,
    /// The learner's answer, as typed.
    pub answer: String,
    /// The reference translation, as returned by the translator.
    pub reference: String,
    /// Tense detected in the learner's answer.
    pub user_tense: Tense,
    /// Tense detected in the reference.
    pub reference_tense: Tense,
    /// Token and rule behind `user_tense`, if any matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_evidence: Option<TenseMatch>,
    /// Token and rule behind `reference_tense`, if any matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_evidence: Option<TenseMatch>,
    /// Share of reference words the learner used.
    pub overlap: f64,
    /// Classification of the answer.
    pub outcome: JudgmentOutcome,
    /// Message for the learner.
    pub feedback: String,
}

/// Judge an answer against a reference that is already known.
///
/// A `None` or blank reference fails with [`DrillError::ReferenceUnavailable`]
/// rather than being judged as empty text.
pub fn judge_round(
    english: &str,
    answer: &str,
    reference: Option<&str>,
) -> Result<RoundReport, DrillError> {
    let reference_tokens = normalize_reference(reference)?;
    let reference = reference.unwrap_or_default();
    let user_tokens = normalize(answer);

    let user_evidence = detect_with_evidence(&user_tokens);
    let reference_evidence = detect_with_evidence(&reference_tokens);
    let user_tense = user_evidence.as_ref().map_or(Tense::Unknown, |m| m.tense);
    let reference_tense = reference_evidence.as_ref().map_or(Tense::Unknown, |m| m.tense);
    let outcome = judge(&user_tokens, &reference_tokens, user_tense, reference_tense);

    tracing::debug!(%outcome, %user_tense, %reference_tense, "judged answer");

    Ok(RoundReport {
        english: english.to_string(),
        answer: answer.to_string(),
        reference: reference.to_string(),
        user_tense,
        reference_tense,
        user_evidence,
        reference_evidence,
        overlap: overlap(&user_tokens, &reference_tokens),
        outcome,
        feedback: feedback::render(outcome, reference, reference_tense),
    })
}

/// Fetch a reference for `english` and judge `answer` against it.
///
/// Blank answers are refused before the translator is contacted.
#[instrument(skip(translator, answer), fields(provider = translator.name()))]
pub async fn check_answer(
    translator: &dyn Translator,
    english: &str,
    answer: &str,
) -> Result<RoundReport, DrillError> {
    if answer.trim().is_empty() {
        return Err(DrillError::EmptyAnswer);
    }

    let reference = fetch_reference(translator, english).await;
    judge_round(english, answer, reference.as_deref())
}

/// A drill over a loaded corpus with one translator.
pub struct DrillSession {
    corpus: Corpus,
    translator: Arc<dyn Translator>,
}

impl DrillSession {
    pub fn new(corpus: Corpus, translator: Arc<dyn Translator>) -> Self {
        Self { corpus, translator }
    }

    pub fn translator_name(&self) -> &str {
        self.translator.name()
    }

    /// Pick a random prompt from `category`.
    pub fn next_prompt(&self, category: &str) -> Result<SentenceEntry, DrillError> {
        self.corpus
            .select(category, 1)?
            .into_iter()
            .next()
            .ok_or_else(|| DrillError::NoValidSentences(category.to_string()))
    }

    /// Judge the learner's answer to `prompt`.
    pub async fn check(
        &self,
        prompt: &SentenceEntry,
        answer: &str,
    ) -> Result<RoundReport, DrillError> {
        check_answer(self.translator.as_ref(), &prompt.english, answer).await
    }
}

/// In-memory outcome counts for the current session.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionTally {
    outcomes: BTreeMap<JudgmentOutcome, u32>,
    unavailable: u32,
}

impl SessionTally {
    pub fn record(&mut self, report: &RoundReport) {
        *self.outcomes.entry(report.outcome).or_default() += 1;
    }

    pub fn record_unavailable(&mut self) {
        self.unavailable += 1;
    }

    pub fn count(&self, outcome: JudgmentOutcome) -> u32 {
        self.outcomes.get(&outcome).copied().unwrap_or(0)
    }

    /// Rounds where the translator could not supply a reference.
    pub fn unavailable(&self) -> u32 {
        self.unavailable
    }

    /// Rounds that were actually judged.
    pub fn judged(&self) -> u32 {
        self.outcomes.values().sum()
    }

    /// Share of judged rounds whose answer was accepted; `0.0` before any.
    pub fn accuracy(&self) -> f64 {
        let judged = self.judged();
        if judged == 0 {
            return 0.0;
        }
        let accepted: u32 = self
            .outcomes
            .iter()
            .filter(|(outcome, _)| outcome.is_accepted())
            .map(|(_, n)| n)
            .sum();
        accepted as f64 / judged as f64
    }
}
