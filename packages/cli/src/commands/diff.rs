use crate::commands::scope_by_kind;
use anyhow::Result;
use ballast_codec::decode_definitions;
use ballast_definitions::{DefinitionKind, DefinitionRecord};
use ballast_editor::{diff_definitions, ReconcilePlan};
use ballast_store::DefinitionStore;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Definition file (multi-document YAML)
    pub file: PathBuf,

    /// Restrict reconciliation to one kind, even if the file holds none of it
    #[arg(short, long)]
    pub kind: Option<DefinitionKind>,
}

pub async fn diff(args: DiffArgs, store: Arc<dyn DefinitionStore>) -> Result<()> {
    let text = fs::read_to_string(&args.file)?;
    let records = decode_definitions(&text)?;

    for (kind, desired) in scope_by_kind(&records, args.kind)? {
        let current = store.list(kind).await?;
        let plan = diff_definitions(&desired, &current);
        print_plan(kind, &plan, &current);
    }

    Ok(())
}

fn print_plan(kind: DefinitionKind, plan: &ReconcilePlan, current: &[DefinitionRecord]) {
    println!("{}", kind.to_string().bold());

    if plan.is_empty() {
        println!("  {}", "nothing to reconcile".dimmed());
        return;
    }

    for record in &plan.upserts {
        println!("  {} upsert {}", "+".green(), record.id());
    }
    for db_id in &plan.deletes {
        // Show the authoring id alongside the store key where we know it.
        let id = current
            .iter()
            .find(|record| record.db_id() == Some(db_id.as_str()))
            .map(|record| record.id())
            .unwrap_or("?");
        println!("  {} delete {} ({})", "-".red(), id, db_id);
    }
}
