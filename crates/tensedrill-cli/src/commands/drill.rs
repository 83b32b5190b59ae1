//! The `tensedrill drill` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use tensedrill_core::corpus::Corpus;
use tensedrill_core::drill::{DrillSession, SessionTally};
use tensedrill_core::model::{JudgmentOutcome, Tense};
use tensedrill_core::DrillError;
use tensedrill_providers::config::load_config_from;
use tensedrill_providers::select_provider;

const QUIT: &str = ":q";

pub async fn execute(
    category: Option<String>,
    rounds: Option<usize>,
    corpus_path: Option<PathBuf>,
    provider: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    if let Some(rounds) = rounds {
        anyhow::ensure!(rounds >= 1, "rounds must be at least 1");
    }

    let config = load_config_from(config_path.as_deref())?;
    let corpus = Corpus::load(corpus_path.as_deref().unwrap_or(config.corpus.as_path()))?;
    let translator = select_provider(&config, provider.as_deref())?;
    let session = DrillSession::new(corpus, Arc::from(translator));

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let category = match category.or(config.default_category) {
        Some(c) => c,
        None => ask_category(&mut input, &mut output)?,
    };

    tracing::info!(
        category = %category,
        provider = session.translator_name(),
        "starting drill"
    );
    let tally = run_drill(&session, &category, rounds, &mut input, &mut output).await?;
    print_summary(&tally, &mut output)?;
    Ok(())
}

/// Ask which tense to practise.
fn ask_category<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<String> {
    write!(
        output,
        "Which would you like to translate [0] Preterite, [1] Imperfect: "
    )?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    match line.parse::<Tense>() {
        Ok(tense @ (Tense::Preterite | Tense::Imperfect)) => Ok(tense.to_string()),
        _ => anyhow::bail!("Invalid input. Please enter 0 or 1."),
    }
}

/// Run drill rounds until `rounds` is reached, input ends, or the learner quits.
async fn run_drill<R: BufRead, W: Write>(
    session: &DrillSession,
    category: &str,
    rounds: Option<usize>,
    input: &mut R,
    output: &mut W,
) -> Result<SessionTally> {
    let mut tally = SessionTally::default();
    let mut played = 0usize;

    'rounds: while rounds.map_or(true, |limit| played < limit) {
        let prompt = session.next_prompt(category)?;
        writeln!(output, "\nTranslate to Spanish: '{}'", prompt.english)?;

        loop {
            write!(output, "> ")?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break 'rounds;
            }
            let answer = line.trim();
            if answer == QUIT {
                break 'rounds;
            }

            match session.check(&prompt, answer).await {
                Ok(report) => {
                    writeln!(output, "{}", report.feedback)?;
                    writeln!(output, "Reference translation: {}", report.reference)?;
                    tally.record(&report);
                    break;
                }
                Err(e) if !e.is_round_local() => return Err(e.into()),
                Err(DrillError::EmptyAnswer) => {
                    writeln!(output, "Please enter a translation.")?;
                }
                Err(_) => {
                    writeln!(output, "Translation service is unavailable.")?;
                    tally.record_unavailable();
                    break;
                }
            }
        }

        played += 1;
    }

    Ok(tally)
}

fn print_summary<W: Write>(tally: &SessionTally, output: &mut W) -> Result<()> {
    use comfy_table::{Cell, Table};

    if tally.judged() + tally.unavailable() == 0 {
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Outcome", "Rounds"]);
    for outcome in JudgmentOutcome::ALL {
        table.add_row(vec![
            Cell::new(outcome.to_string()),
            Cell::new(tally.count(outcome)),
        ]);
    }
    table.add_row(vec![
        Cell::new("reference_unavailable"),
        Cell::new(tally.unavailable()),
    ]);

    writeln!(output, "\n{table}")?;
    writeln!(
        output,
        "Accepted: {:.0}% of {} judged round(s)",
        tally.accuracy() * 100.0,
        tally.judged()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use tensedrill_providers::mock::MockTranslator;

    use super::*;

    const CORPUS: &str = r#"{"categories": {
        "imperfect": [{"english": "I was walking to the store."}],
        "preterite": [{"english": "He went to the park."}]
    }}"#;

    fn session(translator: MockTranslator) -> DrillSession {
        DrillSession::new(Corpus::from_json_str(CORPUS).unwrap(), Arc::new(translator))
    }

    async fn play(session: &DrillSession, rounds: Option<usize>, typed: &str) -> (SessionTally, String) {
        let mut input = Cursor::new(typed.as_bytes().to_vec());
        let mut output = Vec::new();
        let tally = run_drill(session, "imperfect", rounds, &mut input, &mut output)
            .await
            .unwrap();
        (tally, String::from_utf8(output).unwrap())
    }

    #[tokio::test]
    async fn judges_each_round() {
        let session = session(MockTranslator::with_fixed_translation(
            "Estaba caminando a la tienda.",
        ));
        let (tally, out) = play(
            &session,
            Some(2),
            "Estaba caminando a la tienda.\nCaminé a la tienda.\n",
        )
        .await;

        assert!(out.contains("Translate to Spanish: 'I was walking to the store.'"));
        assert!(out.contains("Correct! Nice work."));
        assert!(out.contains("uses the imperfect, not the preterite"));
        assert_eq!(tally.count(JudgmentOutcome::Perfect), 1);
        assert_eq!(tally.count(JudgmentOutcome::TenseMismatch), 1);
    }

    #[tokio::test]
    async fn blank_answer_reprompts() {
        let session = session(MockTranslator::with_fixed_translation("Estaba caminando."));
        let (tally, out) = play(&session, Some(1), "\n  \nEstaba caminando.\n").await;

        assert_eq!(out.matches("Please enter a translation.").count(), 2);
        assert_eq!(tally.judged(), 1);
    }

    #[tokio::test]
    async fn unavailable_reference_moves_on() {
        let session = session(MockTranslator::unavailable());
        let (tally, out) = play(&session, Some(2), "Caminaba.\nCaminaba.\n").await;

        assert_eq!(out.matches("Translation service is unavailable.").count(), 2);
        assert!(!out.contains("Not quite"));
        assert_eq!(tally.unavailable(), 2);
        assert_eq!(tally.judged(), 0);
    }

    #[tokio::test]
    async fn quit_and_eof_end_the_session() {
        let session = session(MockTranslator::with_fixed_translation("Hola"));

        let (tally, _) = play(&session, None, ":q\n").await;
        assert_eq!(tally.judged(), 0);

        let (tally, _) = play(&session, None, "Hola\n").await;
        assert_eq!(tally.judged(), 1);
    }

    #[test]
    fn category_menu() {
        let mut out = Vec::new();
        assert_eq!(
            ask_category(&mut Cursor::new(b"0\n".to_vec()), &mut out).unwrap(),
            "preterite"
        );
        assert_eq!(
            ask_category(&mut Cursor::new(b"1\n".to_vec()), &mut out).unwrap(),
            "imperfect"
        );
        assert_eq!(
            ask_category(&mut Cursor::new("Pretérito\n".as_bytes().to_vec()), &mut out).unwrap(),
            "preterite"
        );
        for typed in ["2\n", "unknown\n", "\n"] {
            let err = ask_category(&mut Cursor::new(typed.as_bytes().to_vec()), &mut out)
                .unwrap_err();
            assert!(err.to_string().contains("Please enter 0 or 1"));
        }
    }

    #[test]
    fn summary_lists_every_outcome() {
        let mut tally = SessionTally::default();
        tally.record_unavailable();
        let mut out = Vec::new();
        print_summary(&tally, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        for outcome in JudgmentOutcome::ALL {
            assert!(out.contains(&outcome.to_string()));
        }
        assert!(out.contains("reference_unavailable"));
    }
}
