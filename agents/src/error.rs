//! Error types for agent construction

use thiserror::Error;

/// Errors raised while building an agent. Searching itself never fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid search depth {depth}: must be at least one round")]
    InvalidDepth { depth: u32 },

    #[error("unknown evaluation function '{name}'. Expected one of: {available}")]
    UnknownEvaluation { name: String, available: String },

    #[error("invalid strategy '{input}'. Expected one of: {expected}")]
    UnknownStrategy { input: String, expected: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
