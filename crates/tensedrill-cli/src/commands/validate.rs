//! The `tensedrill validate` command.

use std::path::PathBuf;

use anyhow::Result;

use tensedrill_core::corpus::Corpus;
use tensedrill_providers::config::load_config_from;

pub fn execute(corpus_path: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let corpus_path = match corpus_path {
        Some(path) => path,
        None => load_config_from(config_path.as_deref())?.corpus,
    };

    let corpus = Corpus::load(&corpus_path)?;
    let names: Vec<&str> = corpus.category_names().collect();
    println!(
        "Corpus: {} ({} categories)",
        corpus_path.display(),
        names.len()
    );

    let mut total_warnings = 0;

    for name in names {
        let listed = corpus.listed_count(name);
        let valid = corpus.valid_count(name);
        println!("  {name}: {valid}/{listed} valid sentences");

        if let Err(e) = corpus.entries(name) {
            println!("  [{name}] WARNING: {e}");
            total_warnings += 1;
        } else if valid < listed {
            println!(
                "  [{name}] WARNING: {} entries without usable English text will be skipped",
                listed - valid
            );
            total_warnings += 1;
        }
    }

    if total_warnings == 0 {
        println!("Corpus valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
