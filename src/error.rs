//! Error types for bridge record parsing.

use thiserror::Error;

/// Errors that can occur when parsing or interpreting bridge records
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("LIN parse error: {0}")]
    Lin(String),

    #[error("PBN parse error: {0}")]
    Pbn(String),

    #[error("invalid card: {0}")]
    Card(String),

    #[error("unknown bid: {0}")]
    Bid(String),

    #[error("invalid contract: {0}")]
    Contract(String),

    #[error("invalid hand: {0}")]
    Hand(String),

    /// Well-formed input that is internally inconsistent
    #[error("malformed record: {0}")]
    Record(String),

    #[error("double dummy parse error: {0}")]
    DoubleDummy(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for bridge record operations
pub type Result<T> = std::result::Result<T, ParseError>;
