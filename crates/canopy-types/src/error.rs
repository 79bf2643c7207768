use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unknown permission {0:?} (expected \"r\", \"w\", \"rw\", or \"none\")")]
    UnknownPermission(String),
}
