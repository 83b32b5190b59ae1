//! tensedrill CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "tensedrill",
    version,
    about = "Spanish preterite/imperfect translation drill"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate English sentences into Spanish, one round at a time
    Drill {
        /// Category to drill: preterite or imperfect (asked interactively if omitted)
        #[arg(long)]
        category: Option<String>,

        /// Stop after this many rounds (default: until EOF or ":q")
        #[arg(long)]
        rounds: Option<usize>,

        /// Sentence corpus JSON file
        #[arg(long)]
        corpus: Option<PathBuf>,

        /// Translation provider name from the config
        #[arg(long)]
        provider: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Judge a single answer
    Check {
        /// The English sentence
        #[arg(long)]
        english: String,

        /// Your Spanish translation
        #[arg(long)]
        answer: String,

        /// Reference translation (skips the translation provider)
        #[arg(long)]
        reference: Option<String>,

        /// Translation provider name from the config
        #[arg(long)]
        provider: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Validate a sentence corpus file
    Validate {
        /// Sentence corpus JSON file
        #[arg(long)]
        corpus: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and sentence corpus
    Init,
}

#[tokio::main]
async fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn,tensedrill=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Drill {
            category,
            rounds,
            corpus,
            provider,
            config,
        } => commands::drill::execute(category, rounds, corpus, provider, config).await,
        Commands::Check {
            english,
            answer,
            reference,
            provider,
            config,
            format,
        } => commands::check::execute(english, answer, reference, provider, config, format).await,
        Commands::Validate { corpus, config } => commands::validate::execute(corpus, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
