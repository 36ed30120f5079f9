// Command routing and dispatch

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use utterance_queue::{UtteranceQueueConfig, WriterSink};

use crate::logging::init_logging;
use crate::runner::ScriptRunner;
use crate::script::parse_script;

/// Utterance - drive a screen-reader announcement queue from a script
#[derive(Parser, Debug)]
#[command(name = "utterance")]
#[command(about = "Drive a rate-limited announcement queue from a script")]
#[command(version)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Queue configuration file (TOML)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimize output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run an announcement script and print what is announced
    Run {
        /// Script file (default: stdin)
        #[arg(value_name = "SCRIPT")]
        script: Option<PathBuf>,

        /// Milliseconds between announcements
        #[arg(long, value_name = "MS")]
        interval: Option<u64>,

        /// Start muted
        #[arg(long)]
        muted: bool,
    },

    /// Print the effective queue configuration
    Config,
}

/// Command router
pub struct CommandRouter;

impl CommandRouter {
    /// Parse arguments and dispatch
    pub async fn route() -> Result<()> {
        let cli = Cli::parse();
        init_logging(cli.verbose, cli.quiet);
        Self::execute(cli).await
    }

    /// Dispatch an already parsed command line
    pub async fn execute(cli: Cli) -> Result<()> {
        let base = match &cli.config {
            Some(path) => UtteranceQueueConfig::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => UtteranceQueueConfig::default(),
        };

        match cli.command {
            Commands::Run {
                script,
                interval,
                muted,
            } => {
                let config = apply_overrides(base, interval, muted);
                config.validate().context("Invalid queue configuration")?;

                let content = read_script(script.as_ref())?;
                let commands = parse_script(&content).context("Failed to parse script")?;

                let sink = Arc::new(WriterSink::new(std::io::stdout()));
                let summary = ScriptRunner::new(&config, sink)?.run(commands).await?;
                tracing::info!(
                    commands = summary.commands,
                    pending = summary.pending,
                    "Script finished"
                );
                Ok(())
            }
            Commands::Config => {
                let text = base.to_toml_string()?;
                print!("{}", text);
                Ok(())
            }
        }
    }
}

/// Layer command-line flags over file configuration
pub fn apply_overrides(
    config: UtteranceQueueConfig,
    interval: Option<u64>,
    muted: bool,
) -> UtteranceQueueConfig {
    let mut overrides = UtteranceQueueConfig {
        muted,
        ..Default::default()
    };
    if let Some(interval_ms) = interval {
        overrides.interval_ms = interval_ms;
    }

    let mut merged = config.merge(overrides);
    // merge skips default-valued fields, but an explicit --interval always wins
    if let Some(interval_ms) = interval {
        merged.interval_ms = interval_ms;
    }
    merged
}

fn read_script(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display())),
        None => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read script from stdin")?;
            Ok(content)
        }
    }
}
