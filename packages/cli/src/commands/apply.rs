use crate::commands::{op_name, scope_by_kind};
use crate::watcher::FileWatcher;
use anyhow::{bail, Result};
use ballast_codec::decode_definitions;
use ballast_definitions::DefinitionKind;
use ballast_editor::{diff_definitions, Executor};
use ballast_store::DefinitionStore;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Definition file (multi-document YAML)
    pub file: PathBuf,

    /// Restrict reconciliation to one kind, even if the file holds none of it
    #[arg(short, long)]
    pub kind: Option<DefinitionKind>,

    /// Re-apply whenever the file changes
    #[arg(short, long)]
    pub watch: bool,
}

pub async fn apply(
    args: ApplyArgs,
    store: Arc<dyn DefinitionStore>,
    timeout: Duration,
) -> Result<()> {
    let first = apply_once(&args, &store, timeout).await;
    if !args.watch {
        return first;
    }
    if let Err(err) = first {
        eprintln!("  {} {}", "✗".red(), err.to_string().red());
    }

    println!();
    println!("{}", "👀 Watching for changes...".bright_blue());

    let watcher = FileWatcher::new(&args.file)?;
    loop {
        tokio::time::sleep(Duration::from_millis(500)).await;

        let mut changed = false;
        while watcher.try_next_event().is_some() {
            changed = true;
        }
        if !changed {
            continue;
        }

        println!("{}", "Definition file changed, re-applying".dimmed());
        if let Err(err) = apply_once(&args, &store, timeout).await {
            eprintln!("  {} {}", "✗".red(), err.to_string().red());
        }
    }
}

async fn apply_once(
    args: &ApplyArgs,
    store: &Arc<dyn DefinitionStore>,
    timeout: Duration,
) -> Result<()> {
    let text = fs::read_to_string(&args.file)?;
    let records = decode_definitions(&text)?;

    let mut failures = 0;
    for (kind, desired) in scope_by_kind(&records, args.kind)? {
        let current = store.list(kind).await?;
        let plan = diff_definitions(&desired, &current);
        if plan.is_empty() {
            println!("{}: nothing to reconcile", kind);
            continue;
        }

        let executor = Executor::new(store.clone(), kind, timeout);
        let report = executor.apply(plan).await;
        failures += report.failed.len();

        println!("{}", kind.to_string().bold());
        for receipt in &report.succeeded {
            println!("  {} {} {}", "✓".green(), op_name(receipt.op), receipt.key);
        }
        for failure in &report.failed {
            eprintln!(
                "  {} {} {} - {}",
                "✗".red(),
                op_name(failure.op),
                failure.key,
                failure.error.to_string().red()
            );
        }
    }

    if failures > 0 {
        bail!("{} operations failed", failures);
    }
    Ok(())
}
