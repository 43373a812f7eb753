//! Error types for the pruning engine.
//!
//! The engine has no recoverable runtime failures. Everything here signals a
//! broken contract with the front end that produced the tree, so callers are
//! expected to surface the error rather than skip the unit silently.

use thiserror::Error;

/// Errors raised while planning or applying import changes for one unit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PruneError {
    /// An import declaration that no conforming parser could have produced.
    #[error("Malformed import '{import}': {reason}")]
    MalformedImport { import: String, reason: String },

    /// A plan was applied to an import list it was not computed for.
    #[error("Import plan has {decisions} decisions for {imports} imports")]
    PlanMismatch { imports: usize, decisions: usize },
}

impl PruneError {
    pub(crate) fn malformed(import: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedImport {
            import: import.into(),
            reason: reason.into(),
        }
    }
}
