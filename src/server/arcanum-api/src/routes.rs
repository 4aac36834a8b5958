//! Route handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::{error, info};

use arcanum_crypto::{CipherAlgorithm, HashAlgorithm};
use arcanum_keystore::{KeyId, KeyStore};
use arcanum_kms::ExportedKey;

use crate::error::ApiError;
use crate::models::{
    DecryptRequest, DecryptResponse, EncryptRequest, EncryptResponse, GenerateKeyRequest,
    GenerateKeyResponse, HashRequest, HashResponse, HealthResponse, VerifyHashRequest,
    VerifyHashResponse,
};
use crate::state::AppState;

/// Plain-text banner served on `/`.
pub const BANNER: &str = "Harry Potter, The Boy Who Lived.!!";

type Shared = State<Arc<AppState>>;

/// Builds the routes of the service.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(banner))
        .route("/health", get(health))
        .route("/generate-key", post(generate_key))
        .route("/encrypt", post(encrypt))
        .route("/decrypt", post(decrypt))
        .route("/generate-hash", post(generate_hash))
        .route("/verify-hash", post(verify_hash))
}

async fn banner() -> &'static str {
    BANNER
}

async fn health(State(state): Shared) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        keys: state.store.len(),
    })
}

async fn generate_key(
    State(state): Shared,
    payload: Result<Json<GenerateKeyRequest>, JsonRejection>,
) -> Result<Json<GenerateKeyResponse>, ApiError> {
    let Json(req) = payload?;
    let key_type = parse_key_type(&req.key_type)?;

    info!(key_type = %key_type, key_size = req.key_size, "Generating key");

    let kms = state.kms.clone();
    let generated = blocking(move || kms.generate(key_type, req.key_size)).await??;

    let key_id = generated.key_id.to_string();
    Ok(Json(match generated.material {
        ExportedKey::Symmetric { key_value } => GenerateKeyResponse {
            key_id,
            key_value: Some(key_value),
            private_key: None,
            public_key: None,
        },
        ExportedKey::Asymmetric {
            private_key,
            public_key,
        } => GenerateKeyResponse {
            key_id,
            key_value: None,
            private_key: Some(private_key),
            public_key: Some(public_key),
        },
    }))
}

async fn encrypt(
    State(state): Shared,
    payload: Result<Json<EncryptRequest>, JsonRejection>,
) -> Result<Json<EncryptResponse>, ApiError> {
    let Json(req) = payload?;
    let key_id = existing_key(&state, req.key_id)?;
    let algorithm = parse_cipher(&req.algorithm)?;

    let transit = state.transit.clone();
    let ciphertext =
        blocking(move || transit.encrypt(&key_id, algorithm, &req.plaintext)).await??;

    Ok(Json(EncryptResponse { ciphertext }))
}

async fn decrypt(
    State(state): Shared,
    payload: Result<Json<DecryptRequest>, JsonRejection>,
) -> Result<Json<DecryptResponse>, ApiError> {
    let Json(req) = payload?;
    let key_id = existing_key(&state, req.key_id)?;
    let algorithm = parse_cipher(&req.algorithm)?;

    let transit = state.transit.clone();
    let plaintext =
        blocking(move || transit.decrypt(&key_id, algorithm, &req.ciphertext)).await??;

    Ok(Json(DecryptResponse { plaintext }))
}

async fn generate_hash(
    State(state): Shared,
    payload: Result<Json<HashRequest>, JsonRejection>,
) -> Result<Json<HashResponse>, ApiError> {
    let Json(req) = payload?;
    let algorithm = parse_hash(&req.algorithm)?;

    Ok(Json(HashResponse {
        hash_value: state.hash.hash(&req.data, algorithm),
        algorithm: algorithm.to_string(),
    }))
}

async fn verify_hash(
    State(state): Shared,
    payload: Result<Json<VerifyHashRequest>, JsonRejection>,
) -> Result<Json<VerifyHashResponse>, ApiError> {
    let Json(req) = payload?;
    let algorithm = parse_hash(&req.algorithm)?;

    let verdict = state.hash.verify(&req.data, &req.hash_value, algorithm);
    Ok(Json(VerifyHashResponse {
        is_valid: verdict.is_valid,
        message: verdict.message.to_string(),
    }))
}

// ============================================================================
// Helpers
// ============================================================================

/// Unknown identifiers are reported before the algorithm is looked at.
fn existing_key(state: &AppState, key_id: String) -> Result<KeyId, ApiError> {
    let key_id = KeyId::from(key_id);
    if !state.store.contains(&key_id) {
        return Err(ApiError::KeyNotFound("Key not found".to_string()));
    }
    Ok(key_id)
}

fn parse_key_type(name: &str) -> Result<CipherAlgorithm, ApiError> {
    name.parse()
        .map_err(|_| ApiError::UnsupportedAlgorithm(format!("Unsupported key type: {}", name)))
}

fn parse_cipher(name: &str) -> Result<CipherAlgorithm, ApiError> {
    name.parse()
        .map_err(|_| ApiError::UnsupportedAlgorithm(format!("Unsupported algorithm: {}", name)))
}

fn parse_hash(name: &str) -> Result<HashAlgorithm, ApiError> {
    name.parse::<HashAlgorithm>().map_err(|_| {
        ApiError::UnsupportedAlgorithm(format!("Unsupported hashing algorithm: {}", name))
    })
}

/// Runs CPU-bound crypto on the blocking pool.
async fn blocking<F, T>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        error!(error = %e, "Blocking task failed");
        ApiError::Internal("Internal server error".to_string())
    })
}
