//! Compilation unit scanner.
//!
//! Recursively walks directories to collect serialized compilation units
//! (`*.unit.json`, as written by the parser front end), skipping entries whose
//! names start with `.` or `_` unless default excludes are disabled. Extra
//! exclusions are glob patterns matched against both the entry name and its
//! full path.

use crate::tree::CompilationUnit;
use anyhow::{Context, Result};
use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Suffix of the files the front end writes, one per Java source file.
pub const UNIT_SUFFIX: &str = ".unit.json";

/// Collects all unit files under `paths`, sorted for stable output.
///
/// A path that names a file directly is taken as is, even without the unit
/// suffix.
pub fn collect_unit_files(
    paths: &[PathBuf],
    excludes: &[String],
    default_excludes: bool,
) -> Result<Vec<PathBuf>> {
    let patterns = excludes
        .iter()
        .map(|p| Pattern::new(p).with_context(|| format!("Invalid exclude pattern '{}'", p)))
        .collect::<Result<Vec<_>>>()?;

    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }
        for entry in WalkDir::new(path)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_excluded(e, &patterns, default_excludes))
        {
            let entry = entry.with_context(|| format!("Failed to walk {}", path.display()))?;
            if entry.file_type().is_file() && is_unit_file(entry.path()) {
                files.push(entry.into_path());
            }
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn is_unit_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(UNIT_SUFFIX))
}

fn is_excluded(entry: &walkdir::DirEntry, patterns: &[Pattern], default_excludes: bool) -> bool {
    let Some(name) = entry.file_name().to_str() else {
        return false;
    };
    if default_excludes && (name.starts_with('.') || name.starts_with('_')) {
        return true;
    }
    patterns
        .iter()
        .any(|p| p.matches(name) || p.matches_path(entry.path()))
}

/// Reads one unit and records where it came from.
pub fn load_unit(file: &Path) -> Result<CompilationUnit> {
    let source = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let mut unit: CompilationUnit = serde_json::from_str(&source)
        .with_context(|| format!("Failed to parse unit {}", file.display()))?;
    unit.source_path = Some(file.to_path_buf());
    Ok(unit)
}

/// Writes `unit` back as pretty-printed JSON.
pub fn store_unit(file: &Path, unit: &CompilationUnit) -> Result<()> {
    let mut json = serde_json::to_string_pretty(unit)
        .with_context(|| format!("Failed to serialize unit for {}", file.display()))?;
    json.push('\n');
    std::fs::write(file, json).with_context(|| format!("Failed to write {}", file.display()))
}
