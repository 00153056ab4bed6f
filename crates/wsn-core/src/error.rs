//! Shared error type.
//!
//! Sub-crates define their own error enums and wrap `WsnError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// Errors raised by `wsn-core` itself, chiefly configuration validation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WsnError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        name:   &'static str,
        reason: String,
    },
}

/// Shorthand result type for `wsn-core`.
pub type WsnResult<T> = Result<T, WsnError>;
