//! Import decisions.
//!
//! Every declaration gets exactly one [`ImportDecision`], computed in three
//! steps over the whole import list:
//!
//! 1. **Direct usage.** Each import is judged on its own against the
//!    [`UsageRecord`]. Wildcards that cover too few used names are expanded
//!    into an explicit list.
//! 2. **Collisions.** Duplicates are dropped, and explicit imports made
//!    redundant by a surviving wildcard are dropped unless removing them
//!    would change what a name resolves to.
//! 3. **Folding.** When no wildcard of a kind survives, a single package or
//!    owner with enough explicit imports is collapsed into a wildcard.
//!
//! Steps 2 and 3 depend on which wildcards survived step 1, so they only run
//! once every import has its first decision.

use crate::classify::{ImportDescriptor, ImportKind, classify};
use crate::config::StyleThresholds;
use crate::error::PruneError;
use crate::names;
use crate::tree::{CompilationUnit, Member, TypeDeclaration};
use crate::usage::UsageRecord;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportDecision {
    Keep,
    Drop,
    /// Replace a wildcard with explicit imports of these simple names, sorted.
    ExpandToList(Vec<String>),
    /// Part of a group replaced by one wildcard placed at the group's first
    /// member.
    CollapseToWildcard,
}

impl ImportDecision {
    pub fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }
}

/// One decision per import declaration, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportPlan {
    pub descriptors: Vec<ImportDescriptor>,
    pub decisions: Vec<ImportDecision>,
}

impl ImportPlan {
    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }

    /// True when applying the plan cannot change the import list.
    pub fn is_identity(&self) -> bool {
        self.decisions.iter().all(ImportDecision::is_keep)
    }
}

/// Decides the fate of every import in `unit`.
pub fn decide(
    unit: &CompilationUnit,
    usage: &UsageRecord,
    style: &StyleThresholds,
) -> Result<ImportPlan, PruneError> {
    let descriptors = unit
        .imports
        .iter()
        .map(classify)
        .collect::<Result<Vec<_>, _>>()?;
    let scope = Scope::new(unit, &descriptors);

    let mut decisions: Vec<ImportDecision> = descriptors
        .iter()
        .map(|d| direct_usage(d, usage, style, &scope))
        .collect();
    drop_duplicates(unit, &mut decisions);
    drop_redundant_types(&descriptors, &mut decisions, &scope);
    drop_redundant_statics(unit, &descriptors, &mut decisions);
    fold_types(&descriptors, &mut decisions, usage, style, &scope);
    fold_statics(&descriptors, &mut decisions, usage, style);

    for (import, decision) in unit.imports.iter().zip(&decisions) {
        trace!(import = %import, decision = ?decision, "import decision");
    }

    Ok(ImportPlan {
        descriptors,
        decisions,
    })
}

/// Names that resolve without any import, plus the names explicit imports
/// already bind.
struct Scope {
    /// Types declared in the unit and known top-level types of its package.
    local_types: BTreeSet<String>,
    own_package: String,
    explicit_types: BTreeSet<String>,
    explicit_statics: BTreeSet<String>,
}

impl Scope {
    fn new(unit: &CompilationUnit, descriptors: &[ImportDescriptor]) -> Self {
        let own_package = unit.package.clone().unwrap_or_default();

        let mut local_types = BTreeSet::new();
        for declaration in &unit.types {
            collect_declared_types(declaration, &mut local_types);
        }
        local_types.extend(
            unit.known_types
                .keys()
                .filter(|name| !names::is_nested(name) && names::package_of(name) == own_package)
                .map(|name| names::simple_name(name).to_string()),
        );

        let explicit_names = |kind: ImportKind| -> BTreeSet<String> {
            descriptors
                .iter()
                .filter(|d| d.kind == kind)
                .filter_map(|d| d.simple_name.clone())
                .collect()
        };

        Self {
            local_types,
            own_package,
            explicit_types: explicit_names(ImportKind::Type),
            explicit_statics: explicit_names(ImportKind::StaticMember),
        }
    }

    /// Whether an unattributed type reference could resolve through a type
    /// wildcard on `container`.
    fn unresolved_type_may_come_from(&self, usage: &UsageRecord, container: &str) -> bool {
        usage
            .unresolved_types()
            .keys()
            .filter(|name| !self.explicit_types.contains(*name) && !self.local_types.contains(*name))
            .any(|name| usage.unresolved_type_may_be(name, container))
    }

    /// Whether an unattributed unqualified member could resolve through some
    /// static wildcard.
    fn unresolved_member_may_come_from_wildcard(&self, usage: &UsageRecord) -> bool {
        usage
            .unresolved_members()
            .iter()
            .any(|name| !self.explicit_statics.contains(name))
    }

    fn collides(&self, simple_name: &str) -> bool {
        names::is_java_lang_name(simple_name) || self.local_types.contains(simple_name)
    }
}

fn collect_declared_types(declaration: &TypeDeclaration, out: &mut BTreeSet<String>) {
    out.insert(declaration.name.clone());
    for member in &declaration.members {
        if let Member::Type(nested) = member {
            collect_declared_types(nested, out);
        }
    }
}

fn direct_usage(
    d: &ImportDescriptor,
    usage: &UsageRecord,
    style: &StyleThresholds,
    scope: &Scope,
) -> ImportDecision {
    let simple = d.simple_name.as_deref().unwrap_or_default();
    let keep_if = |used: bool| {
        if used {
            ImportDecision::Keep
        } else {
            ImportDecision::Drop
        }
    };

    match d.kind {
        ImportKind::Type => keep_if(
            usage.type_needs_import(&d.binary_name)
                || usage.unresolved_type_may_be(simple, &d.container)
                || usage.literal_name(simple),
        ),
        ImportKind::StaticMember => keep_if(
            usage.static_member_used(&d.binary_name, simple)
                || usage.type_needs_import(&d.member_binary_name(simple))
                || usage.unresolved_member(simple),
        ),
        ImportKind::TypeWildcard => {
            if !d.nested && style.folds(&d.container) {
                return ImportDecision::Keep;
            }
            if scope.unresolved_type_may_come_from(usage, &d.container) {
                return ImportDecision::Keep;
            }
            let used = usage.types_from(&d.container);
            threshold(used, style.class_count_to_use_star_import)
        }
        ImportKind::StaticWildcard => {
            if style.folds(&d.package()) {
                return ImportDecision::Keep;
            }
            if scope.unresolved_member_may_come_from_wildcard(usage) {
                return ImportDecision::Keep;
            }
            // Qualified `Owner.member` access resolves without the wildcard.
            let mut used = usage
                .unqualified_static_members_of(&d.binary_name)
                .cloned()
                .unwrap_or_default();
            used.extend(usage.types_from(&d.container));
            threshold(used, style.name_count_to_use_star_import)
        }
    }
}

/// Wildcard verdict from the names it actually supplies.
fn threshold(used: BTreeSet<String>, star_count: usize) -> ImportDecision {
    if used.is_empty() {
        ImportDecision::Drop
    } else if used.len() < star_count {
        ImportDecision::ExpandToList(used.into_iter().collect())
    } else {
        ImportDecision::Keep
    }
}

fn drop_duplicates(unit: &CompilationUnit, decisions: &mut [ImportDecision]) {
    let mut seen = HashSet::new();
    for (import, decision) in unit.imports.iter().zip(decisions.iter_mut()) {
        if !seen.insert(import.key()) {
            *decision = ImportDecision::Drop;
        }
    }
}

fn surviving(
    descriptors: &[ImportDescriptor],
    decisions: &[ImportDecision],
    kind: ImportKind,
) -> Vec<usize> {
    descriptors
        .iter()
        .zip(decisions)
        .enumerate()
        .filter(|(_, (d, decision))| d.kind == kind && decision.is_keep())
        .map(|(i, _)| i)
        .collect()
}

/// With a single surviving type wildcard, explicit imports it already covers
/// are dropped. Nested types and names that would be captured by `java.lang`
/// or the unit's own package keep their explicit import.
fn drop_redundant_types(
    descriptors: &[ImportDescriptor],
    decisions: &mut [ImportDecision],
    scope: &Scope,
) {
    let wildcards = surviving(descriptors, decisions, ImportKind::TypeWildcard);
    let [wildcard] = wildcards.as_slice() else {
        return;
    };
    let target = descriptors[*wildcard].container.clone();

    for (d, decision) in descriptors.iter().zip(decisions.iter_mut()) {
        let redundant = d.kind == ImportKind::Type
            && decision.is_keep()
            && d.container == target
            && !d.nested
            && !d.simple_name.as_deref().is_some_and(|n| scope.collides(n));
        if redundant {
            *decision = ImportDecision::Drop;
        }
    }
}

/// Explicit static imports covered by a surviving static wildcard on the same
/// owner are dropped unless another surviving static wildcard may supply the
/// same name.
fn drop_redundant_statics(
    unit: &CompilationUnit,
    descriptors: &[ImportDescriptor],
    decisions: &mut [ImportDecision],
) {
    let wildcards = surviving(descriptors, decisions, ImportKind::StaticWildcard);
    if wildcards.is_empty() {
        return;
    }

    for i in 0..descriptors.len() {
        let d = &descriptors[i];
        if d.kind != ImportKind::StaticMember || !decisions[i].is_keep() {
            continue;
        }
        let Some(member) = d.simple_name.as_deref() else {
            continue;
        };
        let covered = wildcards
            .iter()
            .any(|&w| descriptors[w].container == d.container);
        if !covered {
            continue;
        }
        let ambiguous = wildcards
            .iter()
            .map(|&w| &descriptors[w])
            .filter(|w| w.container != d.container)
            .any(|w| may_declare(unit, &w.binary_name, member));
        if !ambiguous {
            decisions[i] = ImportDecision::Drop;
        }
    }
}

/// Whether `owner` declares a static member called `member`. Owners missing
/// from the unit's type table are assumed to.
fn may_declare(unit: &CompilationUnit, owner: &str, member: &str) -> bool {
    let info = unit.known_types.get(owner).or_else(|| {
        unit.known_types
            .iter()
            .find(|(name, _)| names::names_equal(name, owner))
            .map(|(_, info)| info)
    });
    info.is_none_or(|info| info.static_members.contains(member))
}

/// Marks the members of the one foldable group, if there is exactly one.
fn collapse_single_group(groups: BTreeMap<String, Vec<usize>>, decisions: &mut [ImportDecision]) {
    let mut eligible = groups.into_values();
    if let (Some(members), None) = (eligible.next(), eligible.next()) {
        for i in members {
            decisions[i] = ImportDecision::CollapseToWildcard;
        }
    }
}

fn fold_types(
    descriptors: &[ImportDescriptor],
    decisions: &mut [ImportDecision],
    usage: &UsageRecord,
    style: &StyleThresholds,
    scope: &Scope,
) {
    if !surviving(descriptors, decisions, ImportKind::TypeWildcard).is_empty() {
        return;
    }

    let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (i, d) in descriptors.iter().enumerate() {
        let foldable = d.kind == ImportKind::Type
            && decisions[i].is_keep()
            && !d.nested
            && d.container != scope.own_package
            && !d.simple_name.as_deref().is_some_and(|n| scope.collides(n));
        if foldable {
            groups.entry(d.container.clone()).or_default().push(i);
        }
    }

    // Members kept only on unattributed evidence would not prove the
    // wildcard's use count on the next run.
    groups.retain(|package, members| {
        (members.len() >= style.class_count_to_use_star_import || style.folds(package))
            && members
                .iter()
                .all(|&i| usage.type_needs_import(&descriptors[i].binary_name))
    });
    collapse_single_group(groups, decisions);
}

fn fold_statics(
    descriptors: &[ImportDescriptor],
    decisions: &mut [ImportDecision],
    usage: &UsageRecord,
    style: &StyleThresholds,
) {
    if !surviving(descriptors, decisions, ImportKind::StaticWildcard).is_empty() {
        return;
    }

    let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (i, d) in descriptors.iter().enumerate() {
        if d.kind == ImportKind::StaticMember && decisions[i].is_keep() {
            groups.entry(d.container.clone()).or_default().push(i);
        }
    }

    groups.retain(|_, members| {
        let owner = &descriptors[members[0]];
        (members.len() >= style.name_count_to_use_star_import || style.folds(&owner.package()))
            && members.iter().all(|&i| {
                let d = &descriptors[i];
                let member = d.simple_name.as_deref().unwrap_or_default();
                usage.static_member_used_unqualified(&d.binary_name, member)
                    || usage.type_needs_import(&d.member_binary_name(member))
            })
    });
    collapse_single_group(groups, decisions);
}
