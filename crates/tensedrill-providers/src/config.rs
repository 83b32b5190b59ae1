//! Provider configuration and factory.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use tensedrill_core::traits::Translator;

use crate::deepl::{DeeplProvider, DEFAULT_TIMEOUT_SECS};
use crate::mock::MockTranslator;

/// Configuration for a single translation provider.
///
/// Note: Custom Debug impl masks API keys to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    Deepl {
        #[serde(default)]
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
        #[serde(default = "default_timeout")]
        timeout_secs: u64,
        /// Overrides the request's source language, e.g. `"EN"`.
        #[serde(default)]
        source_lang: Option<String>,
        /// Overrides the request's target language, e.g. `"ES"`.
        #[serde(default)]
        target_lang: Option<String>,
    },
    Mock {
        #[serde(default)]
        translations: HashMap<String, String>,
        #[serde(default)]
        fallback: Option<String>,
    },
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderConfig::Deepl {
                api_key: _,
                base_url,
                timeout_secs,
                source_lang,
                target_lang,
            } => f
                .debug_struct("Deepl")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .field("timeout_secs", timeout_secs)
                .field("source_lang", source_lang)
                .field("target_lang", target_lang)
                .finish(),
            ProviderConfig::Mock {
                translations,
                fallback,
            } => f
                .debug_struct("Mock")
                .field("translations", &translations.len())
                .field("fallback", fallback)
                .finish(),
        }
    }
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Top-level tensedrill configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrillConfig {
    /// Provider configurations keyed by name.
    #[serde(default)]
    pub providers: BTreeMap<String, ProviderConfig>,
    /// Provider used when none is named on the command line.
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Path to the sentence corpus.
    #[serde(default = "default_corpus")]
    pub corpus: PathBuf,
    /// Category drilled when none is named on the command line.
    #[serde(default)]
    pub default_category: Option<String>,
}

fn default_provider() -> String {
    "deepl".to_string()
}
fn default_corpus() -> PathBuf {
    PathBuf::from("sentences.json")
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            providers: BTreeMap::new(),
            default_provider: default_provider(),
            corpus: default_corpus(),
            default_category: None,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    resolve_with(s, |name| std::env::var(name).ok())
}

fn resolve_with(s: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        result.push_str(&lookup(&rest[start + 2..start + end]).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Resolve env vars in a provider config.
fn resolve_provider_config(config: &ProviderConfig) -> ProviderConfig {
    match config {
        ProviderConfig::Deepl {
            api_key,
            base_url,
            timeout_secs,
            source_lang,
            target_lang,
        } => ProviderConfig::Deepl {
            api_key: resolve_env_vars(api_key),
            base_url: base_url.as_ref().map(|u| resolve_env_vars(u)),
            timeout_secs: *timeout_secs,
            source_lang: source_lang.clone(),
            target_lang: target_lang.clone(),
        },
        mock @ ProviderConfig::Mock { .. } => mock.clone(),
    }
}

/// Inject or overwrite the DeepL key from the environment.
///
/// `DEEPL_API_KEY` wins over the bare `API_KEY` used by older `.env` files.
fn apply_env_overrides(config: &mut DrillConfig, lookup: impl Fn(&str) -> Option<String>) {
    let Some(key) = lookup("DEEPL_API_KEY").or_else(|| lookup("API_KEY")) else {
        return;
    };
    if key.trim().is_empty() {
        return;
    }

    let entry = config
        .providers
        .entry("deepl".into())
        .or_insert(ProviderConfig::Deepl {
            api_key: String::new(),
            base_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            source_lang: None,
            target_lang: None,
        });
    if let ProviderConfig::Deepl { api_key, .. } = entry {
        *api_key = key;
    }
}

/// Load config from an explicit path, or search the well-known locations.
///
/// Search order without a path:
/// 1. `tensedrill.toml` in the current directory
/// 2. `~/.config/tensedrill/config.toml`
///
/// A `.env` file in the current directory is read first. Environment
/// variable overrides: `DEEPL_API_KEY`, or the legacy `API_KEY`.
pub fn load_config_from(path: Option<&Path>) -> Result<DrillConfig> {
    if let Ok(env_path) = dotenvy::dotenv() {
        tracing::debug!(path = %env_path.display(), "loaded .env");
    }

    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("tensedrill.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => parse_config_file(&path)?,
        None => DrillConfig::default(),
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok());

    config.providers = config
        .providers
        .iter()
        .map(|(k, v)| (k.clone(), resolve_provider_config(v)))
        .collect();

    Ok(config)
}

fn parse_config_file(path: &Path) -> Result<DrillConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str::<DrillConfig>(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("tensedrill"))
}

/// Create a translator from its configuration.
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn Translator>> {
    match config {
        ProviderConfig::Deepl {
            api_key,
            base_url,
            timeout_secs,
            source_lang,
            target_lang,
        } => Ok(Box::new(
            DeeplProvider::with_timeout(api_key, base_url.clone(), *timeout_secs)?
                .with_languages(source_lang.clone(), target_lang.clone()),
        )),
        ProviderConfig::Mock {
            translations,
            fallback,
        } => Ok(Box::new(
            MockTranslator::new(translations.clone()).with_fallback(fallback.clone()),
        )),
    }
}

/// Create the translator named `name`, or the configured default.
pub fn select_provider(config: &DrillConfig, name: Option<&str>) -> Result<Box<dyn Translator>> {
    let name = name.unwrap_or(&config.default_provider);
    match config.providers.get(name) {
        Some(provider) => {
            tracing::info!(provider = name, "using translation provider");
            create_provider(provider)
        }
        None => anyhow::bail!(
            "provider '{}' not found in config. Available: {:?}",
            name,
            config.providers.keys().collect::<Vec<_>>()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_TENSEDRILL_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_TENSEDRILL_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_TENSEDRILL_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("${unterminated"), "${unterminated");
        std::env::remove_var("_TENSEDRILL_TEST_VAR");
    }

    #[test]
    fn self_referencing_value_is_not_expanded_again() {
        let lookup = |name: &str| (name == "KEY").then(|| "${KEY}".to_string());
        assert_eq!(resolve_with("${KEY}", lookup), "${KEY}");
        assert_eq!(resolve_with("a${KEY}b${MISSING}c", lookup), "a${KEY}bc");
        assert_eq!(resolve_with("x${KEY}${", lookup), "x${KEY}${");
    }

    #[test]
    fn default_config() {
        let config = DrillConfig::default();
        assert_eq!(config.default_provider, "deepl");
        assert_eq!(config.corpus, PathBuf::from("sentences.json"));
        assert!(config.providers.is_empty());
    }

    #[test]
    fn parse_provider_config() {
        let toml_str = r#"
default_provider = "offline"
corpus = "data/sentences.json"
default_category = "imperfect"

[providers.deepl]
type = "deepl"
api_key = "abc:fx"

[providers.offline]
type = "mock"
fallback = "No sé."

[providers.offline.translations]
"He went to the park." = "Fue al parque."
"#;
        let config: DrillConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.providers.len(), 2);
        assert_eq!(config.default_category.as_deref(), Some("imperfect"));
        assert!(matches!(
            config.providers.get("deepl"),
            Some(ProviderConfig::Deepl {
                timeout_secs: 5,
                ..
            })
        ));
        match config.providers.get("offline") {
            Some(ProviderConfig::Mock { translations, .. }) => {
                assert_eq!(translations["He went to the park."], "Fue al parque.");
            }
            other => panic!("expected mock provider, got {other:?}"),
        }
    }

    #[test]
    fn parse_deepl_languages() {
        let toml_str = r#"
[providers.deepl]
type = "deepl"
api_key = "k"
source_lang = "EN"
target_lang = "FR"
"#;
        let config: DrillConfig = toml::from_str(toml_str).unwrap();
        match config.providers.get("deepl") {
            Some(ProviderConfig::Deepl {
                source_lang,
                target_lang,
                ..
            }) => {
                assert_eq!(source_lang.as_deref(), Some("EN"));
                assert_eq!(target_lang.as_deref(), Some("FR"));
            }
            other => panic!("expected deepl provider, got {other:?}"),
        }
        assert!(format!("{config:?}").contains("FR"));
    }

    #[test]
    fn languages_default_to_request_pair() {
        let config: DrillConfig = toml::from_str(
            r#"
[providers.deepl]
type = "deepl"
api_key = "k"
"#,
        )
        .unwrap();
        assert!(matches!(
            config.providers.get("deepl"),
            Some(ProviderConfig::Deepl {
                source_lang: None,
                target_lang: None,
                ..
            })
        ));
    }

    #[test]
    fn debug_masks_api_key() {
        let config = ProviderConfig::Deepl {
            api_key: "super-secret".into(),
            base_url: None,
            timeout_secs: 5,
            source_lang: None,
            target_lang: None,
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("***"));
    }

    #[test]
    fn env_override_injects_deepl() {
        let mut config = DrillConfig::default();
        apply_env_overrides(&mut config, |name| {
            (name == "API_KEY").then(|| "legacy-key".to_string())
        });
        assert!(matches!(
            config.providers.get("deepl"),
            Some(ProviderConfig::Deepl { api_key, .. }) if api_key == "legacy-key"
        ));
    }

    #[test]
    fn env_override_prefers_deepl_key() {
        let mut config = DrillConfig::default();
        config.providers.insert(
            "deepl".into(),
            ProviderConfig::Deepl {
                api_key: "from-file".into(),
                base_url: Some("http://localhost:1".into()),
                timeout_secs: 9,
                source_lang: None,
                target_lang: Some("ES".into()),
            },
        );
        apply_env_overrides(&mut config, |name| match name {
            "DEEPL_API_KEY" => Some("primary".into()),
            "API_KEY" => Some("legacy".into()),
            _ => None,
        });
        match config.providers.get("deepl") {
            Some(ProviderConfig::Deepl {
                api_key,
                timeout_secs,
                target_lang,
                ..
            }) => {
                assert_eq!(api_key, "primary");
                assert_eq!(*timeout_secs, 9);
                assert_eq!(target_lang.as_deref(), Some("ES"));
            }
            other => panic!("unexpected provider: {other:?}"),
        }
    }

    #[test]
    fn blank_env_key_is_ignored() {
        let mut config = DrillConfig::default();
        apply_env_overrides(&mut config, |_| Some("  ".into()));
        assert!(config.providers.is_empty());
    }

    #[test]
    fn explicit_missing_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_from(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn select_provider_by_name() {
        let mut config = DrillConfig::default();
        config.providers.insert(
            "offline".into(),
            ProviderConfig::Mock {
                translations: HashMap::new(),
                fallback: Some("Hola".into()),
            },
        );

        let translator = select_provider(&config, Some("offline")).unwrap();
        assert_eq!(translator.name(), "mock");

        let err = select_provider(&config, None).err().unwrap();
        assert!(err.to_string().contains("provider 'deepl' not found"));
    }
}
