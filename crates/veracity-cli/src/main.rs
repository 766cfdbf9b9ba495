//! Veracity CLI - Credibility checks and literacy training for social-media posts.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use veracity_cli::commands;
use veracity_cli::repl;
use veracity_cli::{AppContext, Cli, Command, Config, Formatter};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Load or create config
    let config_path = match &cli.config {
        Some(path) => PathBuf::from(path),
        None => Config::path()?,
    };
    let config = Config::load_from(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;
    config.write_if_missing(&config_path);
    config.validate()?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    // Config commands never need the LLM or the score database
    let command = match cli.command {
        Some(Command::Config(args)) => {
            return Ok(commands::execute_config(args, &config, &config_path)?);
        }
        other => other,
    };

    let context =
        AppContext::from_config(&config).context("Failed to initialize the analyzer")?;

    match command {
        Some(Command::Analyze(args)) => {
            commands::execute_analyze(args, &context.analysis, &formatter).await?;
        }
        Some(Command::Quiz(args)) => {
            commands::execute_quiz(args, &context.quiz, &formatter).await?;
        }
        Some(Command::Score) => {
            commands::execute_score(&context.scores, &formatter)?;
        }
        None | Some(Command::Repl) | Some(Command::Config(_)) => {
            repl::run_repl(&context, &config, &formatter).await?;
        }
    }

    context.shutdown()?;
    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("VERACITY_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}
