//! tensedrill-core — Translation judgment for Spanish past-tense drills.
//!
//! This crate holds the sentence bank, normalization, tense detection,
//! overlap scoring, judgment and feedback logic. Network access to
//! translation services lives behind the [`traits::Translator`] trait.

pub mod corpus;
pub mod drill;
pub mod error;
pub mod feedback;
pub mod model;
pub mod normalize;
pub mod scoring;
pub mod tense;
pub mod traits;

pub use error::DrillError;
