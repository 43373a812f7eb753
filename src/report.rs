//! Batch runs over unit files and their reports.
//!
//! Loads every unit, prunes them in parallel, and summarizes what changed.
//! The structures serialize to the JSON printed by `check --json`.

use crate::config::StyleThresholds;
use crate::engine::{ImportChanges, prune};
use crate::scanner::load_unit;
use crate::tree::CompilationUnit;
use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;

/// Planned import changes for one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub file: PathBuf,
    #[serde(flatten)]
    pub changes: ImportChanges,
    /// Rewritten unit, kept for writing back. Not part of the report.
    #[serde(skip)]
    pub unit: CompilationUnit,
}

/// Summary statistics from a run.
#[derive(Debug, Default, Serialize)]
pub struct Diagnostics {
    pub files_scanned: usize,
    pub units_changed: usize,
    pub abstained: usize,
    pub imports_removed: usize,
    pub imports_added: usize,
}

/// Complete results of a run.
#[derive(Debug, Serialize)]
pub struct RunResult {
    pub changed: Vec<FileReport>,
    pub diagnostics: Diagnostics,
}

/// Prunes every file in `files`. Fails on the first unreadable unit or
/// malformed import, naming the file.
pub fn prune_files(files: &[PathBuf], style: &StyleThresholds) -> Result<RunResult> {
    let outcomes = files
        .par_iter()
        .map(|file| -> Result<_> {
            let unit = load_unit(file)?;
            let outcome = prune(&unit, style)
                .with_context(|| format!("Failed to prune {}", file.display()))?;
            let abstained = !unit.missing_types.is_empty();
            Ok((file, unit, outcome, abstained))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut diagnostics = Diagnostics {
        files_scanned: files.len(),
        ..Diagnostics::default()
    };
    let mut changed = Vec::new();
    for (file, original, outcome, abstained) in outcomes {
        if abstained {
            diagnostics.abstained += 1;
        }
        if !outcome.changed {
            continue;
        }
        let changes = outcome.changes(&original);
        diagnostics.units_changed += 1;
        diagnostics.imports_removed += changes.removed.len();
        diagnostics.imports_added += changes.added.len();
        changed.push(FileReport {
            file: file.clone(),
            changes,
            unit: outcome.unit,
        });
    }

    Ok(RunResult {
        changed,
        diagnostics,
    })
}
