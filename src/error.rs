//! Error type shared by the page capabilities.
//!
//! None of these ever reach the visitor: controllers log them and carry on.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid site config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("preference storage unavailable: {0}")]
    Storage(String),

    #[error("analytics data layer rejected event: {0}")]
    DataLayer(String),

    #[error("dom operation failed: {0}")]
    Dom(String),
}

pub type Result<T> = std::result::Result<T, Error>;
