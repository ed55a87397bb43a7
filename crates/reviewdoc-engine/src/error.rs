use thiserror::Error;

/// Failures that abort a document build.
///
/// Content problems never show up here; they are recorded as diagnostics and
/// the build carries on. These variants mean the calling front end broke the
/// emission protocol.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("cannot pop scope: no scope is open")]
    ScopeUnderflow,

    #[error("document finished with {depth} unclosed scope(s)")]
    UnclosedScope { depth: usize },

    #[error("table row {row} has {found} cells but the table has {expected} columns")]
    TableShape {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("review document JSON: {0}")]
    Serialize(#[from] serde_json::Error),
}
