//! Loudscope CLI
//!
//! Command-line interface for the Loudscope analysis engine.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use loudscope::cli::{commands, Cli, Commands};
use loudscope::{Analyzer, AnalyzerConfig};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG overrides the verbosity flag
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => AnalyzerConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AnalyzerConfig::default(),
    };
    let analyzer = Analyzer::with_config(config);

    if let Err(e) = run(&analyzer, cli.command) {
        tracing::error!(code = e.error_code(), "{}", e.recovery_hint());
        return Err(e.into());
    }

    Ok(())
}

fn run(analyzer: &Analyzer, command: Option<Commands>) -> loudscope::Result<()> {
    match command {
        Some(Commands::Analyze { input, json }) => commands::analyze(analyzer, &input, json),
        Some(Commands::Compare { a, b }) => commands::compare(analyzer, &a, &b),
        Some(Commands::Compliance { input, platform }) => {
            commands::compliance(analyzer, &input, platform.as_deref())
        }
        Some(Commands::Batch { dir, json }) => commands::batch(analyzer, &dir, json),
        None => {
            println!("Loudscope v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}
