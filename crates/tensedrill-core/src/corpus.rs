//! Sentence bank loading and sampling.
//!
//! The corpus file is a JSON object of the form
//! `{ "categories": { "<name>": [ { "english": ..., "spanish": ... }, ... ] } }`.
//! Structure is validated once at load time; malformed entries inside a
//! category are dropped rather than rejected so one bad line does not take
//! down a whole category.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde_json::Value;

use crate::error::DrillError;
use crate::model::SentenceEntry;

/// Entries of one category after validation.
#[derive(Debug, Clone, Default)]
struct CategoryEntries {
    /// Number of items listed in the file, valid or not.
    listed: usize,
    /// Entries with a non-blank English string.
    valid: Vec<SentenceEntry>,
}

/// A read-only, validated sentence bank.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    categories: BTreeMap<String, CategoryEntries>,
}

impl Corpus {
    /// Read and validate a corpus file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read corpus: {}", path.display()))?;
        let corpus = Self::from_json_str(&content)
            .with_context(|| format!("failed to load corpus: {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            categories = corpus.categories.len(),
            "loaded sentence corpus"
        );
        Ok(corpus)
    }

    /// Parse a corpus from JSON text.
    pub fn from_json_str(content: &str) -> Result<Self, DrillError> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| DrillError::InvalidCorpus(format!("malformed JSON: {e}")))?;
        Self::from_value(&value)
    }

    /// Validate an already-parsed JSON document.
    pub fn from_value(value: &Value) -> Result<Self, DrillError> {
        let root = value
            .as_object()
            .ok_or_else(|| DrillError::InvalidCorpus("corpus must be a JSON object".into()))?;

        let categories = root
            .get("categories")
            .and_then(Value::as_object)
            .ok_or_else(|| {
                DrillError::InvalidCorpus("missing or invalid 'categories' key".into())
            })?;

        let categories = categories
            .iter()
            .map(|(name, entries)| (name.clone(), parse_category(entries)))
            .collect();

        Ok(Self { categories })
    }

    /// Category names in sorted order.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Number of items listed under a category, including invalid ones.
    pub fn listed_count(&self, category: &str) -> usize {
        self.categories.get(category).map_or(0, |c| c.listed)
    }

    /// Number of entries under a category with usable English text.
    pub fn valid_count(&self, category: &str) -> usize {
        self.categories.get(category).map_or(0, |c| c.valid.len())
    }

    /// Valid entries of a category, surfacing the bank's error kinds.
    pub fn entries(&self, category: &str) -> Result<&[SentenceEntry], DrillError> {
        let entries = self
            .categories
            .get(category)
            .filter(|c| c.listed > 0)
            .ok_or_else(|| DrillError::UnknownCategory(category.to_string()))?;

        if entries.valid.is_empty() {
            return Err(DrillError::NoValidSentences(category.to_string()));
        }
        Ok(&entries.valid)
    }

    /// Draw up to `count` distinct entries from a category at random.
    ///
    /// `count` is clamped to the number of valid entries; asking for more
    /// than exist is not an error.
    pub fn select(&self, category: &str, count: usize) -> Result<Vec<SentenceEntry>, DrillError> {
        self.select_with_rng(category, count, &mut rand::rng())
    }

    /// Same as [`Corpus::select`] with a caller-supplied random source.
    pub fn select_with_rng<R: Rng + ?Sized>(
        &self,
        category: &str,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<SentenceEntry>, DrillError> {
        let valid = self.entries(category)?;
        let sample: Vec<SentenceEntry> = valid
            .choose_multiple(rng, count.min(valid.len()))
            .cloned()
            .collect();
        tracing::debug!(
            category,
            requested = count,
            sampled = sample.len(),
            "sampled sentences"
        );
        Ok(sample)
    }
}

fn parse_category(entries: &Value) -> CategoryEntries {
    let Some(items) = entries.as_array() else {
        return CategoryEntries::default();
    };

    let valid = items.iter().filter_map(parse_entry).collect();
    CategoryEntries {
        listed: items.len(),
        valid,
    }
}

fn parse_entry(item: &Value) -> Option<SentenceEntry> {
    let obj = item.as_object()?;
    let english = obj.get("english")?.as_str()?;
    if english.trim().is_empty() {
        return None;
    }
    let spanish = obj
        .get("spanish")
        .and_then(Value::as_str)
        .map(str::to_string);

    Some(SentenceEntry {
        english: english.to_string(),
        spanish,
    })
}
