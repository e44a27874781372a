//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent malformed catalog data.
/// The index itself never fails; these only arise while parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid course record on line {line}: {message}")]
    InvalidRecord { line: usize, message: String },
}
