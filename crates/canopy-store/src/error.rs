use std::fmt;

use thiserror::Error;

/// Which operation a permission check rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessKind {
    Read,
    Write,
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AccessKind::Read => "reading",
            AccessKind::Write => "writing to",
        })
    }
}

/// Errors from store operations.
///
/// All failures are synchronous and raised at the point of violation;
/// nothing is retried or recovered internally.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The effective policy of the leading segment disallows the operation.
    #[error("access denied for {op} path: {path}")]
    AccessDenied { op: AccessKind, path: String },

    /// No value exists at the path, or the path descends past a leaf.
    #[error("no value at path: {path}")]
    NotFound { path: String },

    /// A producer invoked during a read did not yield a store.
    #[error("producer at {segment:?} did not yield a store")]
    InvalidProducer { segment: String },

    /// A write addressed the empty path, which names no key.
    #[error("cannot write to the empty path")]
    EmptyPath,
}

/// Result alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
