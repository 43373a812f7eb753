//! Command-line interface definitions.
//!
//! Defines the argument parser and subcommands using clap's derive API.
//! Each subcommand corresponds to a distinct operation: reporting planned
//! import changes, applying them, showing the effective style, or listing
//! scan targets.

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// Prune unused imports and rebalance wildcard imports in parsed Java units.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Print additional diagnostics to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Which unit files to process.
#[derive(Debug, Clone, ClapArgs)]
pub struct ScanArgs {
    /// Paths to scan for `*.unit.json` files. Defaults to current directory.
    #[arg(short, long)]
    pub paths: Option<Vec<PathBuf>>,

    /// Glob patterns for directories/files to exclude (e.g., "build", "*Test.unit.json").
    /// By default, entries starting with `.` or `_` are excluded.
    #[arg(short, long)]
    pub exclude: Vec<String>,

    /// Disable default exclusion of `.` and `_` prefixed entries.
    #[arg(long)]
    pub no_default_excludes: bool,
}

impl ScanArgs {
    pub fn scan_paths(&self) -> Vec<PathBuf> {
        self.paths
            .clone()
            .unwrap_or_else(|| vec![PathBuf::from(".")])
    }
}

/// Style threshold sources and overrides.
#[derive(Debug, Clone, ClapArgs)]
pub struct StyleArgs {
    /// TOML file with style thresholds. Defaults to `.import-pruner.toml` when present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Minimum number of used types from one package to keep a type wildcard.
    #[arg(long)]
    pub class_count: Option<usize>,

    /// Minimum number of used members from one owner to keep a static wildcard.
    #[arg(long)]
    pub name_count: Option<usize>,

    /// Package that is always imported with a wildcard. Repeatable.
    #[arg(long)]
    pub fold: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Report imports that would be removed or added, without writing.
    Check {
        #[command(flatten)]
        scan: ScanArgs,

        #[command(flatten)]
        style: StyleArgs,

        /// Emit JSON instead of human-readable output.
        #[arg(long)]
        json: bool,
    },

    /// Rewrite unit files with pruned imports.
    Apply {
        /// Actually modify files (default is dry-run).
        #[arg(long)]
        write: bool,

        /// Interactively confirm each file's changes before applying.
        #[arg(short, long)]
        interactive: bool,

        #[command(flatten)]
        scan: ScanArgs,

        #[command(flatten)]
        style: StyleArgs,
    },

    /// Print the effective style thresholds.
    Style {
        #[command(flatten)]
        style: StyleArgs,
    },

    /// List files that would be processed without processing them.
    Scan {
        #[command(flatten)]
        scan: ScanArgs,
    },
}
