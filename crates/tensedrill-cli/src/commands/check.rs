//! The `tensedrill check` command.

use std::path::PathBuf;

use anyhow::Result;

use tensedrill_core::drill::{check_answer, judge_round, RoundReport};
use tensedrill_providers::config::load_config_from;
use tensedrill_providers::select_provider;

pub async fn execute(
    english: String,
    answer: String,
    reference: Option<String>,
    provider: Option<String>,
    config_path: Option<PathBuf>,
    format: String,
) -> Result<()> {
    anyhow::ensure!(
        matches!(format.as_str(), "text" | "json"),
        "unknown format '{format}', expected text or json"
    );

    let report = match reference {
        Some(reference) => {
            anyhow::ensure!(!answer.trim().is_empty(), "please enter a translation");
            judge_round(&english, &answer, Some(&reference))?
        }
        None => {
            let config = load_config_from(config_path.as_deref())?;
            let translator = select_provider(&config, provider.as_deref())?;
            check_answer(translator.as_ref(), &english, &answer).await?
        }
    };

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print_text(&report),
    }

    Ok(())
}

fn print_text(report: &RoundReport) {
    println!("Result: {}", report.outcome);
    println!("{}", report.feedback);
    println!("Reference translation: {}", report.reference);
    println!(
        "Tenses: answer {}, reference {} (overlap {:.0}%)",
        report.user_tense,
        report.reference_tense,
        report.overlap * 100.0
    );
}
