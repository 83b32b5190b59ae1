//! tensedrill-providers — Machine-translation provider integrations.
//!
//! Implements the `Translator` trait for DeepL and for an offline table,
//! and loads provider configuration from `tensedrill.toml`.

pub mod config;
pub mod deepl;
pub mod error;
pub mod mock;

pub use config::{create_provider, load_config_from, select_provider, DrillConfig, ProviderConfig};
pub use error::ProviderError;
