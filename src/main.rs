//! # Intern FAQ Desk CLI (`faq`)
//!
//! The `faq` binary serves the FAQ chatbot over HTTP and offers a few
//! commands for working with the knowledge base locally.
//!
//! ## Usage
//!
//! ```bash
//! faq [--config ./config/faq.toml] <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `faq serve` | Start the chatbot HTTP server |
//! | `faq ask "<question>"` | Print the chatbot reply for one question |
//! | `faq entries` | List knowledge base entries in match order |
//! | `faq check` | Validate configuration and knowledge base |
//!
//! Logging goes to stderr and honors `RUST_LOG`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use intern_faq::{ask, check, config, entries, server};

/// Intern FAQ Desk — FAQ chatbot for the internship management portal.
#[derive(Parser)]
#[command(
    name = "faq",
    about = "Intern FAQ Desk — fuzzy FAQ chatbot for the internship management portal",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// When omitted, built-in defaults and the built-in knowledge base are used.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Start the chatbot HTTP server.
    ///
    /// Builds the FAQ index once and binds to `[server].bind`.
    Serve,

    /// Answer a single question.
    Ask {
        /// The question text.
        question: String,

        /// Also print the best candidate, its score, and the threshold decision.
        #[arg(long)]
        explain: bool,
    },

    /// List knowledge base entries.
    Entries,

    /// Validate configuration and knowledge base.
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match (&cli.command, cli.verbose) {
        (_, true) => "intern_faq=debug,tower_http=debug",
        (Commands::Serve, false) => "intern_faq=info,tower_http=info",
        _ => "intern_faq=warn",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cfg = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => config::Config::minimal(),
    };

    match cli.command {
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::Ask { question, explain } => {
            ask::run_ask(&cfg, &question, explain)?;
        }
        Commands::Entries => {
            entries::list_entries(&cfg)?;
        }
        Commands::Check => {
            check::run_check(&cfg)?;
        }
    }

    Ok(())
}
