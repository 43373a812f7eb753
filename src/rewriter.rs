//! Import list rewriting.
//!
//! Applies an [`ImportPlan`] by building a fresh import list in declaration
//! order. The original list is never edited in place. Formatting prefixes of
//! dropped declarations are carried forward so blank lines between import
//! groups survive when a group's leading import disappears.

use crate::classify::ImportKind;
use crate::decider::{ImportDecision, ImportPlan};
use crate::error::PruneError;
use crate::tree::{CompilationUnit, ImportDeclaration, Space};
use std::collections::HashSet;

/// Accumulates the new list while tracking formatting donated by drops.
#[derive(Debug, Default)]
struct ImportListBuilder {
    imports: Vec<ImportDeclaration>,
    seen: HashSet<(String, bool)>,
    /// Prefix of the first declaration in the current run of drops.
    pending_prefix: Option<Space>,
}

impl ImportListBuilder {
    fn drop_one(&mut self, prefix: &Space) {
        if self.pending_prefix.is_none() {
            self.pending_prefix = Some(prefix.clone());
        }
    }

    /// Emits `import` unless an identical declaration was already emitted, in
    /// which case it counts as dropped with `dropped_prefix`.
    fn emit(&mut self, import: ImportDeclaration, dropped_prefix: &Space) {
        if !self.seen.insert(import.key()) {
            self.drop_one(dropped_prefix);
            return;
        }
        let import = match self.pending_prefix.take() {
            Some(donated) if donated.line_breaks() >= import.prefix.line_breaks() => {
                import.with_prefix(donated)
            }
            _ => import,
        };
        self.imports.push(import);
    }
}

/// Produces `unit` with its import list rebuilt according to `plan`.
///
/// The plan must have been computed for this unit. If every import is
/// removed, the first type declaration's prefix is normalized so the file
/// does not open with the blank lines that used to follow the imports.
pub fn rewrite(unit: &CompilationUnit, plan: &ImportPlan) -> Result<CompilationUnit, PruneError> {
    if plan.decisions.len() != unit.imports.len() || plan.descriptors.len() != unit.imports.len()
    {
        return Err(PruneError::PlanMismatch {
            imports: unit.imports.len(),
            decisions: plan.decisions.len(),
        });
    }

    let mut builder = ImportListBuilder::default();
    for ((import, descriptor), decision) in unit
        .imports
        .iter()
        .zip(&plan.descriptors)
        .zip(&plan.decisions)
    {
        match decision {
            ImportDecision::Keep => builder.emit(import.clone(), &import.prefix),
            ImportDecision::Drop => builder.drop_one(&import.prefix),
            ImportDecision::ExpandToList(members) => {
                for (i, member) in members.iter().enumerate() {
                    let qualified = format!("{}.{}", descriptor.container, member);
                    let expanded = if descriptor.kind == ImportKind::StaticWildcard {
                        ImportDeclaration::static_member(&qualified)
                            .with_type_name(&descriptor.binary_name)
                    } else {
                        ImportDeclaration::single(&qualified)
                            .with_type_name(&descriptor.member_binary_name(member))
                    };
                    let prefix = if i == 0 {
                        import.prefix.clone()
                    } else {
                        Space::newline()
                    };
                    builder.emit(expanded.with_prefix(prefix), &import.prefix);
                }
            }
            ImportDecision::CollapseToWildcard => {
                let wildcard = if descriptor.kind == ImportKind::StaticMember {
                    ImportDeclaration::static_wildcard(&descriptor.container)
                        .with_type_name(&descriptor.binary_name)
                } else {
                    ImportDeclaration::wildcard(&descriptor.container)
                };
                builder.emit(wildcard.with_prefix(import.prefix.clone()), &import.prefix);
            }
        }
    }

    let mut rewritten = unit.clone();
    rewritten.imports = builder.imports;
    if rewritten.imports.is_empty()
        && !unit.imports.is_empty()
        && let Some(first) = rewritten.types.first_mut()
    {
        let lead = if unit.package.is_some() { "\n\n" } else { "" };
        first.prefix = first.prefix.with_leading(lead);
    }
    Ok(rewritten)
}
