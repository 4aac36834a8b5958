//! Key store error types.

use thiserror::Error;

/// Errors that can occur during key store operations.
#[derive(Debug, Error)]
pub enum KeyStoreError {
    /// No record is registered under this identifier.
    #[error("key not found: {0}")]
    NotFound(String),
}
