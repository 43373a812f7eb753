//! Style thresholds that govern wildcard folding.
//!
//! Thresholds come from an optional TOML file (`.import-pruner.toml` in the
//! working directory unless `--config` names another) and are then overridden
//! by command-line flags. Missing keys fall back to the defaults below.
//!
//! ```toml
//! class_count_to_use_star_import = 5
//! name_count_to_use_star_import = 3
//! packages_always_folded = ["java.awt.*", "javax.swing.*"]
//! ```

use anyhow::{Context, Result};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = ".import-pruner.toml";

/// Immutable per-run folding policy, shared read-only across units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleThresholds {
    /// Type wildcards covering fewer used types than this are expanded.
    #[serde(alias = "classCountToUseStarImport")]
    pub class_count_to_use_star_import: usize,
    /// Static wildcards covering fewer used members than this are expanded.
    #[serde(alias = "nameCountToUseStarImport")]
    pub name_count_to_use_star_import: usize,
    /// Packages whose wildcards are always kept and never expanded.
    #[serde(alias = "packagesAlwaysFolded")]
    pub packages_always_folded: BTreeSet<String>,
}

impl Default for StyleThresholds {
    fn default() -> Self {
        Self {
            class_count_to_use_star_import: 5,
            name_count_to_use_star_import: 3,
            packages_always_folded: ["java.awt", "javax.swing"]
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

impl StyleThresholds {
    /// Whether `package` is always represented by a wildcard.
    ///
    /// Entries may be written with or without a trailing `.*`.
    pub fn folds(&self, package: &str) -> bool {
        self.packages_always_folded
            .iter()
            .any(|entry| entry.strip_suffix(".*").unwrap_or(entry) == package)
    }

    /// Reads thresholds from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    /// Loads `explicit` if given, else the default file when present, else
    /// built-in defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }
        let default = PathBuf::from(DEFAULT_CONFIG_FILE);
        if default.is_file() {
            let thresholds = Self::load(&default)?;
            return Ok((thresholds, Some(default)));
        }
        Ok((Self::default(), None))
    }

    /// Applies command-line overrides. Extra fold packages are added to the
    /// configured set rather than replacing it.
    pub fn with_overrides(
        mut self,
        class_count: Option<usize>,
        name_count: Option<usize>,
        fold: &[String],
    ) -> Self {
        if let Some(count) = class_count {
            self.class_count_to_use_star_import = count;
        }
        if let Some(count) = name_count {
            self.name_count_to_use_star_import = count;
        }
        self.packages_always_folded.extend(fold.iter().cloned());
        self
    }

    /// Prints the effective thresholds.
    pub fn print(&self, source: Option<&Path>) {
        match source {
            Some(path) => println!("{} {}", "config:".blue().bold(), path.display()),
            None => println!("{} built-in defaults", "config:".blue().bold()),
        }
        println!(
            "  class_count_to_use_star_import = {}",
            self.class_count_to_use_star_import
        );
        println!(
            "  name_count_to_use_star_import = {}",
            self.name_count_to_use_star_import
        );
        if self.packages_always_folded.is_empty() {
            println!("  packages_always_folded = {}", "(none)".dimmed());
        } else {
            println!("  packages_always_folded =");
            for package in &self.packages_always_folded {
                println!("    {}", package.dimmed());
            }
        }
    }
}
