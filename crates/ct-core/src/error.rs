//! Configuration error type.
//!
//! Runtime conditions are never errors in this workspace; only a config that
//! fails [`SimConfig::validate`](crate::SimConfig::validate) is.  Sub-crates
//! wrap `CoreError` with `#[from]` where they surface it.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
