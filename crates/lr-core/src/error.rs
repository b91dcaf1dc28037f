use thiserror::Error;

/// Top-level error type for the lr-core crate and dependents.
#[derive(Debug, Error)]
pub enum LexError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("lexicon load failed: {0}")]
    LexiconLoad(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("alias target {0} does not resolve to a registered agent")]
    InvalidAliasTarget(i64),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Convenience Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, LexError>;
