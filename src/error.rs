//! Error types for invctl
//!
//! Library code uses `crate::error::Result<T>` which returns `InvctlError`.
//! CLI code uses `anyhow::Result<T>` for top-level error handling; the
//! conversion happens at the CLI boundary and preserves error chains.
//!
//! The only failure that propagates out of the collection pipeline is
//! region enumeration (`InvctlError::Aws` from `collect_all`). Every other
//! external-call failure is caught at the narrowest scope, logged, and
//! replaced with a sentinel value. There is no retry machinery: a failed
//! call is a permanent miss for that invocation.

use thiserror::Error;

/// Main error type for invctl
#[derive(Error, Debug)]
pub enum InvctlError {
    #[error("AWS SDK error: {0}")]
    Aws(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {field} - {reason}")]
    Validation { field: String, reason: String },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, InvctlError>;
