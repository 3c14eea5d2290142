//! MenuBot entry point.
//!
//! Binary name: `menubot`
//!
//! Parses CLI arguments, validates configuration, and either exits after the
//! check or drops into a local REPL that drives the dispatcher from stdin.

mod repl;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use menubot_core::dispatch::Dispatcher;
use menubot_core::flow::quiz::TriviaQuiz;
use menubot_infra::config::BotConfig;
use menubot_infra::memory::MemoryCatalogStore;
use menubot_infra::survey::TomlScoringSource;

#[derive(Parser)]
#[command(name = "menubot", about = "Conversational menu-and-quiz bot", version)]
struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Machine-readable output where applicable
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate configuration and the survey file, then exit
    Check,
    /// Drive the dispatcher interactively from stdin
    Repl,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,menubot=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    match cli.command {
        Commands::Check => check(cli.json).await,
        Commands::Repl => {
            let config = BotConfig::from_env()?;
            let scoring = Arc::new(TomlScoringSource::load(&config.survey_path).await?);
            let dispatcher = Dispatcher::new(
                Arc::new(MemoryCatalogStore::new()),
                scoring,
                TriviaQuiz::builtin(),
                config.admin,
            );
            repl::run(dispatcher, config.admin).await
        }
    }
}

/// Load configuration and the survey file, reporting what was found.
/// Exits non-zero when either is missing or malformed.
async fn check(json: bool) -> anyhow::Result<()> {
    let config = BotConfig::from_env()?;
    let scoring = TomlScoringSource::load(&config.survey_path).await?;
    let questions = scoring.question_count();
    let styles = scoring.style_count();

    if json {
        let report = serde_json::json!({
            "admin_id": config.admin.0,
            "survey_path": config.survey_path,
            "questions": questions,
            "styles": styles,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("configuration ok");
        println!("  admin id:    {}", config.admin);
        println!("  survey file: {}", config.survey_path.display());
        println!("  questions:   {questions}");
        println!("  styles:      {styles}");
    }
    Ok(())
}
