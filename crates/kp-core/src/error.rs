//! Workspace base error type.
//!
//! Sub-crates define their own error enums and wrap `KpError` as one variant
//! via `#[from]`, so a parameter-validation failure surfaces unchanged from
//! whichever layer triggered it.

use thiserror::Error;

/// The top-level error type for `kp-core`.
#[derive(Debug, Error)]
pub enum KpError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `kp-core`.
pub type KpResult<T> = Result<T, KpError>;
