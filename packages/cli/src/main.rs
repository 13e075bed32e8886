mod commands;
mod config;
mod watcher;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{apply, diff, get, ApplyArgs, DiffArgs, GetArgs};
use config::Config;
use std::sync::Arc;
use std::time::Duration;

use ballast_store::{DefinitionStore, HttpDefinitionStore};

/// Ballast CLI - sync scaling definitions with a remote store
#[derive(Parser, Debug)]
#[command(name = "ballast")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Definition store endpoint (overrides ballast.config.json)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the current definitions of a kind as editable YAML
    Get(GetArgs),

    /// Show the operations an apply would issue, without applying them
    Diff(DiffArgs),

    /// Reconcile the store with a definition file
    Apply(ApplyArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let cwd = std::env::current_dir()
        .expect("Cannot get current directory")
        .display()
        .to_string();

    let result = run(cli, &cwd).await;

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}

async fn run(cli: Cli, cwd: &str) -> anyhow::Result<()> {
    let config = Config::load(cwd)?;
    let endpoint = cli.endpoint.unwrap_or(config.endpoint);
    let timeout = Duration::from_secs(cli.timeout.unwrap_or(config.timeout_secs));

    let store: Arc<dyn DefinitionStore> =
        Arc::new(HttpDefinitionStore::with_timeout(&endpoint, Some(timeout))?);

    match cli.command {
        Command::Get(args) => get(args, store).await,
        Command::Diff(args) => diff(args, store).await,
        Command::Apply(args) => apply(args, store, timeout).await,
    }
}
