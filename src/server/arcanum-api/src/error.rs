//! API error type and its HTTP rendering.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

use arcanum_kms::KmsError;
use arcanum_transit::TransitError;

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

/// Every failure an operation can report to a client.
///
/// The message is what the client sees; internal detail is logged where the
/// error is created and never rendered.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad key size, key/algorithm mismatch, or malformed request.
    #[error("{0}")]
    InvalidParameter(String),

    /// Unknown key type, cipher or hash name.
    #[error("{0}")]
    UnsupportedAlgorithm(String),

    /// Referenced key identifier was never issued.
    #[error("{0}")]
    KeyNotFound(String),

    /// RSA plaintext exceeds the OAEP capacity of the key.
    #[error("{0}")]
    PlaintextTooLarge(String),

    /// Ciphertext could not be decrypted.
    #[error("{0}")]
    DecryptionFailed(String),

    /// Unexpected failure.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidParameter(_) | Self::UnsupportedAlgorithm(_) => StatusCode::BAD_REQUEST,
            Self::DecryptionFailed(_) => StatusCode::BAD_REQUEST,
            Self::KeyNotFound(_) => StatusCode::NOT_FOUND,
            Self::PlaintextTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_client_error() {
            warn!(status = %status, error = %self, "Request rejected");
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidParameter(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<KmsError> for ApiError {
    fn from(err: KmsError) -> Self {
        match err {
            KmsError::InvalidKeySize {
                key_type,
                size,
                allowed,
            } => Self::InvalidParameter(format!(
                "Invalid key size for {}: {} (allowed: {})",
                key_type, size, allowed
            )),
            KmsError::Crypto(e) => {
                error!(error = %e, "Key generation failed");
                Self::Internal("Key generation failed".to_string())
            },
        }
    }
}

impl From<TransitError> for ApiError {
    fn from(err: TransitError) -> Self {
        match err {
            TransitError::KeyNotFound(_) => Self::KeyNotFound("Key not found".to_string()),
            TransitError::KeyTypeMismatch { .. } => Self::InvalidParameter(capitalize(&err)),
            TransitError::PlaintextTooLarge { .. } => Self::PlaintextTooLarge(capitalize(&err)),
            TransitError::DecryptionFailed(_) => Self::DecryptionFailed(capitalize(&err)),
            TransitError::EncryptionFailed(e) => {
                error!(error = %e, "Encryption failed");
                Self::Internal("Encryption failed".to_string())
            },
        }
    }
}

fn capitalize(err: &impl std::fmt::Display) -> String {
    let message = err.to_string();
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => message,
    }
}
