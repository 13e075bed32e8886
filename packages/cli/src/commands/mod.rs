mod apply;
mod diff;
mod get;

pub use apply::{apply, ApplyArgs};
pub use diff::{diff, DiffArgs};
pub use get::{get, GetArgs};

use anyhow::{bail, Result};
use ballast_definitions::{DefinitionKind, DefinitionRecord};
use ballast_editor::OpKind;

/// Group decoded records into per-kind reconciliation scopes.
///
/// Without `--kind`, each kind appearing in the file is reconciled and
/// kinds absent from the file are left untouched. With `--kind`, the file
/// must contain only that kind and the scope always covers it, so an empty
/// file deletes every persisted record of the kind.
pub(crate) fn scope_by_kind(
    records: &[DefinitionRecord],
    only: Option<DefinitionKind>,
) -> Result<Vec<(DefinitionKind, Vec<DefinitionRecord>)>> {
    if let Some(kind) = only {
        if let Some(record) = records.iter().find(|record| record.kind() != kind) {
            bail!(
                "\"{}\" is a {} definition, but --kind {} was given",
                record.id(),
                record.kind(),
                kind
            );
        }
        return Ok(vec![(kind, records.to_vec())]);
    }

    let mut scopes: Vec<(DefinitionKind, Vec<DefinitionRecord>)> = Vec::new();
    for record in records {
        match scopes.iter_mut().find(|(kind, _)| *kind == record.kind()) {
            Some((_, group)) => group.push(record.clone()),
            None => scopes.push((record.kind(), vec![record.clone()])),
        }
    }
    Ok(scopes)
}

pub(crate) fn op_name(op: OpKind) -> &'static str {
    match op {
        OpKind::Upsert => "upsert",
        OpKind::Delete => "delete",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballast_definitions::{Metadata, ScalingComponentDefinition, ScalingPlanDefinition};

    fn component(id: &str) -> DefinitionRecord {
        DefinitionRecord::ScalingComponent(ScalingComponentDefinition {
            id: id.to_string(),
            db_id: None,
            component_kind: "aws-ec2-autoscaling".to_string(),
            metadata: Metadata::new(),
            enabled: true,
        })
    }

    fn plan(id: &str) -> DefinitionRecord {
        DefinitionRecord::ScalingPlan(ScalingPlanDefinition {
            id: id.to_string(),
            db_id: None,
            metadata: Metadata::new(),
            plans: vec![],
            enabled: true,
        })
    }

    #[test]
    fn test_scopes_follow_kinds_in_file() {
        let records = vec![component("web"), plan("scale-out"), component("workers")];
        let scopes = scope_by_kind(&records, None).unwrap();

        assert_eq!(scopes.len(), 2);
        assert_eq!(scopes[0].0, DefinitionKind::ScalingComponent);
        assert_eq!(scopes[0].1.len(), 2);
        assert_eq!(scopes[1].0, DefinitionKind::ScalingPlan);
    }

    #[test]
    fn test_kind_flag_scopes_empty_file() {
        let scopes = scope_by_kind(&[], Some(DefinitionKind::ScalingPlan)).unwrap();
        assert_eq!(scopes.len(), 1);
        assert!(scopes[0].1.is_empty());
    }

    #[test]
    fn test_kind_flag_rejects_mixed_file() {
        let records = vec![component("web")];
        let result = scope_by_kind(&records, Some(DefinitionKind::ScalingPlan));
        assert!(result.is_err());
    }
}
