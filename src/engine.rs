//! Per-unit orchestration: gate, collect, decide, rewrite.
//!
//! Nothing here keeps state between calls, so [`prune`] can be re-run on its
//! own output (it is a fixed point) and [`prune_batch`] can fan units out
//! across threads with only the thresholds shared.

use crate::config::StyleThresholds;
use crate::decider::decide;
use crate::error::PruneError;
use crate::rewriter::rewrite;
use crate::tree::CompilationUnit;
use crate::usage::collect;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

/// Result of pruning one unit.
#[derive(Debug, Clone, PartialEq)]
pub struct PruneOutcome {
    pub unit: CompilationUnit,
    /// Whether the import list differs from the input.
    pub changed: bool,
}

impl PruneOutcome {
    fn unchanged(unit: &CompilationUnit) -> Self {
        Self {
            unit: unit.clone(),
            changed: false,
        }
    }

    /// Import lines removed and added relative to `original`.
    pub fn changes(&self, original: &CompilationUnit) -> ImportChanges {
        ImportChanges::between(original, &self.unit)
    }
}

/// Import lines that differ between two versions of a unit, for reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportChanges {
    pub removed: Vec<String>,
    pub added: Vec<String>,
}

impl ImportChanges {
    pub fn between(before: &CompilationUnit, after: &CompilationUnit) -> Self {
        let old: BTreeSet<_> = before.imports.iter().map(|i| i.key()).collect();
        let new: BTreeSet<_> = after.imports.iter().map(|i| i.key()).collect();
        Self {
            removed: before
                .imports
                .iter()
                .filter(|i| !new.contains(&i.key()))
                .map(ToString::to_string)
                .collect(),
            added: after
                .imports
                .iter()
                .filter(|i| !old.contains(&i.key()))
                .map(ToString::to_string)
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty()
    }
}

/// Prunes and rebalances the imports of one unit.
///
/// A unit whose front end reported unresolved types is returned unchanged:
/// without complete attribution an import cannot be proven unused.
pub fn prune(unit: &CompilationUnit, style: &StyleThresholds) -> Result<PruneOutcome, PruneError> {
    let name = unit_name(unit);
    if !unit.missing_types.is_empty() {
        debug!(
            unit = %name,
            missing = unit.missing_types.len(),
            "abstaining: unit has unresolved types"
        );
        return Ok(PruneOutcome::unchanged(unit));
    }
    if unit.imports.is_empty() {
        return Ok(PruneOutcome::unchanged(unit));
    }

    let usage = collect(unit);
    let plan = decide(unit, &usage, style)?;
    if plan.is_identity() {
        debug!(unit = %name, imports = plan.len(), "all imports kept");
        return Ok(PruneOutcome::unchanged(unit));
    }

    let rewritten = rewrite(unit, &plan)?;
    let changed = rewritten != *unit;
    debug!(
        unit = %name,
        before = unit.imports.len(),
        after = rewritten.imports.len(),
        changed,
        "pruned imports"
    );
    Ok(PruneOutcome {
        unit: rewritten,
        changed,
    })
}

/// Prunes many units in parallel. Results are in input order.
pub fn prune_batch(
    units: &[CompilationUnit],
    style: &StyleThresholds,
) -> Vec<Result<PruneOutcome, PruneError>> {
    units.par_iter().map(|unit| prune(unit, style)).collect()
}

fn unit_name(unit: &CompilationUnit) -> String {
    match (&unit.source_path, unit.types.first()) {
        (Some(path), _) => path.display().to_string(),
        (None, Some(declaration)) => match &unit.package {
            Some(package) => format!("{}.{}", package, declaration.name),
            None => declaration.name.clone(),
        },
        (None, None) => "<unnamed>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{ImportDeclaration, Member, TypeDeclaration, TypeTree, Variable};

    fn order_unit() -> CompilationUnit {
        CompilationUnit::new(Some("com.acme"))
            .with_import(ImportDeclaration::single("java.util.List"))
            .with_import(ImportDeclaration::single("java.util.Set"))
            .with_type(
                TypeDeclaration::class("Order").with_member(Member::Field(Variable::new(
                    TypeTree::class("List", "java.util.List"),
                    "lines",
                ))),
            )
    }

    #[test]
    fn removes_unused_and_reports_change() {
        let unit = order_unit();
        let outcome = prune(&unit, &StyleThresholds::default()).unwrap();
        assert!(outcome.changed);
        assert_eq!(outcome.unit.import_lines(), "import java.util.List;");
        let changes = outcome.changes(&unit);
        assert_eq!(changes.removed, vec!["import java.util.Set;"]);
        assert!(changes.added.is_empty());
    }

    #[test]
    fn abstains_on_missing_types() {
        let mut unit = order_unit();
        unit.missing_types.push("com.acme.Unknown".into());
        let outcome = prune(&unit, &StyleThresholds::default()).unwrap();
        assert!(!outcome.changed);
        assert_eq!(outcome.unit, unit);
    }

    #[test]
    fn second_run_is_a_fixed_point() {
        let style = StyleThresholds::default();
        let first = prune(&order_unit(), &style).unwrap();
        let second = prune(&first.unit, &style).unwrap();
        assert!(!second.changed);
        assert_eq!(second.unit, first.unit);
    }

    #[test]
    fn unit_without_imports_is_untouched() {
        let unit = CompilationUnit::new(None).with_type(TypeDeclaration::class("Empty"));
        let outcome = prune(&unit, &StyleThresholds::default()).unwrap();
        assert!(!outcome.changed);
    }

    #[test]
    fn batch_preserves_order_and_errors() {
        let broken = CompilationUnit::new(Some("com.acme"))
            .with_import(ImportDeclaration::single("java..List"));
        let results = prune_batch(
            &[order_unit(), broken, order_unit()],
            &StyleThresholds::default(),
        );
        assert_eq!(results.len(), 3);
        assert!(results[0].as_ref().is_ok_and(|o| o.changed));
        assert!(matches!(
            results[1],
            Err(PruneError::MalformedImport { .. })
        ));
        assert!(results[2].is_ok());
    }

    #[test]
    fn changes_list_expansions_as_added() {
        let before = CompilationUnit::new(Some("com.acme"))
            .with_import(ImportDeclaration::wildcard("javax.persistence"));
        let after = CompilationUnit::new(Some("com.acme"))
            .with_import(ImportDeclaration::single("javax.persistence.Entity"));
        let changes = ImportChanges::between(&before, &after);
        assert_eq!(changes.removed, vec!["import javax.persistence.*;"]);
        assert_eq!(changes.added, vec!["import javax.persistence.Entity;"]);
        assert!(!changes.is_empty());
    }
}
