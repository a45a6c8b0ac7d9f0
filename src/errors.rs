use std::{path::PathBuf, time::Duration};

use thiserror::Error;

/// Rejection raised while constructing or re-validating an expense.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid date format: {0}, please use dd/MM/yyyy.")]
    InvalidDate(String),
    #[error("Invalid category")]
    InvalidCategory(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

/// Any failure to obtain a conversion rate.
#[derive(Debug, Error)]
pub enum RateUnavailableError {
    #[error("API key not found in environment variable `{0}`")]
    MissingCredential(String),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("rate lookup timed out after {0:?}")]
    Timeout(Duration),
    #[error("rate provider answered with HTTP {0}")]
    Status(u16),
    #[error("rate provider rejected {from} → {to}: {reason}")]
    Rejected {
        from: String,
        to: String,
        reason: String,
    },
    #[error("invalid rate provider URL: {0}")]
    InvalidEndpoint(String),
    #[error("malformed rate response: {0}")]
    Malformed(String),
    #[error("no conversion rate for {from} → {to}")]
    MissingRate { from: String, to: String },
}

/// Positional access outside `[0, len)`.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("index {index} is out of range for {len} expenses")]
pub struct IndexError {
    pub index: usize,
    pub len: usize,
}

/// Persistence failures, propagated unchanged from the backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("no saved expenses at `{}`", .0.display())]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("snapshot schema version {found} is newer than supported version {supported}")]
    UnsupportedSchema { found: u32, supported: u32 },
}

/// Umbrella error for operations that can fail in more than one way.
#[derive(Debug, Error)]
pub enum ExpenseError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    RateUnavailable(#[from] RateUnavailableError),
    #[error(transparent)]
    Index(#[from] IndexError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, ExpenseError>;
