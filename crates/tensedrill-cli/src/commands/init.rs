//! The `tensedrill init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create tensedrill.toml
    if std::path::Path::new("tensedrill.toml").exists() {
        println!("tensedrill.toml already exists, skipping.");
    } else {
        std::fs::write("tensedrill.toml", SAMPLE_CONFIG)?;
        println!("Created tensedrill.toml");
    }

    // Create starter corpus
    if std::path::Path::new("sentences.json").exists() {
        println!("sentences.json already exists, skipping.");
    } else {
        std::fs::write("sentences.json", SAMPLE_CORPUS)?;
        println!("Created sentences.json");
    }

    println!("\nNext steps:");
    println!("  1. Put your DeepL key in .env as DEEPL_API_KEY=...");
    println!("  2. Run: tensedrill validate --corpus sentences.json");
    println!("  3. Run: tensedrill drill --category imperfect");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# tensedrill configuration

default_provider = "deepl"
corpus = "sentences.json"

[providers.deepl]
type = "deepl"
api_key = "${DEEPL_API_KEY}"
timeout_secs = 5

# Offline provider for practising without network access.
[providers.offline]
type = "mock"

[providers.offline.translations]
"I was walking to the store." = "Estaba caminando a la tienda."
"He went to the park." = "Fue al parque."
"#;

const SAMPLE_CORPUS: &str = include_str!("../../data/sentences.json");
