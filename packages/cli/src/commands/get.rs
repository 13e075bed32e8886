use anyhow::Result;
use ballast_codec::encode_definitions;
use ballast_definitions::DefinitionKind;
use ballast_store::DefinitionStore;
use clap::Args;
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct GetArgs {
    /// Definition kind: "plans" or "scaling-components"
    pub kind: DefinitionKind,
}

pub async fn get(args: GetArgs, store: Arc<dyn DefinitionStore>) -> Result<()> {
    let mut records = store.list(args.kind).await?;

    // Stable order for display; persisted text is never sorted.
    records.sort_by(|a, b| a.id().cmp(b.id()));

    let text = encode_definitions(&records)?;
    print!("{}", text);
    Ok(())
}
