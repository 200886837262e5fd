//! CLI-specific error types

use thiserror::Error;

use crate::store::StoreError;

/// Result type for CLI commands
pub type CliResult<T> = Result<T, CliError>;

/// CLI command failure
#[derive(Debug, Error)]
pub enum CliError {
    /// Opening or seeding the store failed
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Binding or serving failed
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}
