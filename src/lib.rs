//! import-pruner library for pruning and rebalancing Java imports.
//!
//! This library works on type-attributed syntax trees produced by a parser
//! front end (see [`tree`]). The core workflow for one compilation unit
//! involves three phases:
//!
//! 1. **Collection**: Walk the whole tree and record every type, static
//!    member and unattributed name it refers to ([`usage`])
//! 2. **Decision**: Judge each import against that record and the style
//!    thresholds, resolve collisions, and fold or expand wildcards ([`decider`])
//! 3. **Rewriting**: Build the new import list, carrying formatting over from
//!    dropped declarations ([`rewriter`])
//!
//! [`engine::prune`] runs all three, abstaining on units with unresolved types.
//!
//! # Example
//!
//! ```no_run
//! use import_pruner::{StyleThresholds, engine, scanner};
//! use std::path::PathBuf;
//!
//! let files = scanner::collect_unit_files(&[PathBuf::from("./units")], &[], true).unwrap();
//! let style = StyleThresholds::default();
//!
//! for file in &files {
//!     let unit = scanner::load_unit(file).unwrap();
//!     let outcome = engine::prune(&unit, &style).unwrap();
//!     if outcome.changed {
//!         let changes = outcome.changes(&unit);
//!         println!("{}: -{} +{}", file.display(), changes.removed.len(), changes.added.len());
//!     }
//! }
//! ```

pub mod classify;
pub mod config;
pub mod decider;
pub mod engine;
pub mod error;
pub mod names;
pub mod report;
pub mod rewriter;
pub mod scanner;
pub mod tree;
pub mod usage;

// Re-export commonly used types at crate root
pub use config::StyleThresholds;
pub use decider::{ImportDecision, ImportPlan};
pub use engine::{ImportChanges, PruneOutcome, prune, prune_batch};
pub use error::PruneError;
pub use tree::CompilationUnit;
pub use usage::UsageRecord;
