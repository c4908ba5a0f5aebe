use thiserror::Error;

use super::LedgerKey;

/// Reasons a ledger file or value is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("line {line}: expected KEY=value, found {content:?}")]
    Malformed { line: usize, content: String },

    #[error("line {line}: {key} appears more than once")]
    DuplicateKey { line: usize, key: LedgerKey },

    #[error("invalid value {value:?} for {key} (expected {expected})")]
    InvalidValue {
        key: LedgerKey,
        value: String,
        expected: &'static str,
    },

    /// Wraps a value error with its line. The inner message is part of this
    /// one, not a separate cause, so it prints once in a context chain.
    #[error("line {line}: {error}")]
    AtLine { line: usize, error: Box<LedgerError> },
}
