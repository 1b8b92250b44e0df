mod commands;
mod console;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use codenova_common::types::Language;

#[derive(Parser)]
#[command(name = "codenova")]
#[command(about = "CodeNova - run code against test cases on a remote judge and share the results", long_about = None)]
struct Cli {
    #[command(flatten)]
    backend: BackendArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Overrides for the client configuration; unset values come from the environment
#[derive(Args)]
pub struct BackendArgs {
    /// Judge API base URL
    #[arg(long, global = true, env = "CODENOVA_API_URL")]
    pub api_url: Option<String>,

    /// Origin used to build share links
    #[arg(long, global = true, env = "CODENOVA_SHARE_ORIGIN")]
    pub share_origin: Option<String>,

    /// Delay between result polls in milliseconds
    #[arg(long, global = true, env = "CODENOVA_POLL_INTERVAL_MS")]
    pub poll_interval_ms: Option<u64>,

    /// Polls to wait for a result before giving up
    #[arg(long, global = true, env = "CODENOVA_MAX_POLL_ATTEMPTS")]
    pub max_poll_attempts: Option<u32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a source file with test cases and wait for the verdict
    Run {
        /// Source file to submit
        #[arg(short, long)]
        file: PathBuf,

        /// Language (javascript, python); inferred from the extension when omitted
        #[arg(short, long)]
        language: Option<Language>,

        /// Test case as INPUT::EXPECTED (use \n for line breaks); repeatable
        #[arg(short, long = "case")]
        cases: Vec<String>,

        /// JSON file with an array of {"input", "expectedOutput"} objects
        #[arg(long)]
        cases_file: Option<PathBuf>,

        /// Share the run when every test case passes
        #[arg(long, default_value = "false")]
        share: bool,
    },

    /// Restore a shared run by id or link
    Load {
        /// Share id or full share link
        share: String,

        /// Write the restored source to this file
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// List supported languages
    Languages,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            file,
            language,
            cases,
            cases_file,
            share,
        } => {
            let config = commands::client_config(&cli.backend)?;
            let all_passed = commands::run_code(
                config,
                &file,
                language,
                &cases,
                cases_file.as_deref(),
                share,
            )
            .await?;
            if !all_passed {
                std::process::exit(1);
            }
        }
        Commands::Load { share, out } => {
            let config = commands::client_config(&cli.backend)?;
            commands::load_shared(config, &share, out.as_deref()).await?;
        }
        Commands::Languages => {
            commands::list_languages();
        }
    }

    Ok(())
}
