//! Integration tests for the Arcanum server.
//!
//! Each test serves the real router on an ephemeral port and drives it over
//! HTTP.

// Allow unwrap() in tests - panics are acceptable for test assertions
#![allow(clippy::disallowed_methods)]

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

use arcanum_api::AppState;

// ============================================================================
// API Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub keys: usize,
}

#[derive(Debug, Serialize)]
pub struct GenerateKeyRequest {
    pub key_type: String,
    pub key_size: u32,
}

#[derive(Debug, Deserialize)]
pub struct GenerateKeyResponse {
    pub key_id: String,
    pub key_value: Option<String>,
    pub private_key: Option<String>,
    pub public_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EncryptResponse {
    pub ciphertext: String,
}

#[derive(Debug, Deserialize)]
pub struct DecryptResponse {
    pub plaintext: String,
}

#[derive(Debug, Deserialize)]
pub struct HashResponse {
    pub hash_value: String,
    pub algorithm: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyHashResponse {
    pub is_valid: bool,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// A failed request: the status and the server's error message.
#[derive(Debug)]
pub struct ApiFailure {
    pub status: StatusCode,
    pub error: String,
}

// ============================================================================
// Test Server
// ============================================================================

/// A test server running the real router in-process.
pub struct TestServer {
    handle: JoinHandle<()>,
    pub addr: SocketAddr,
    pub base_url: String,
}

impl TestServer {
    /// Start a new test server on an ephemeral port.
    pub async fn start() -> Result<Self> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("Failed to bind test listener")?;
        let addr = listener.local_addr()?;

        let app = arcanum_api::router(AppState::new());
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let server = Self {
            handle,
            addr,
            base_url: format!("http://{}", addr),
        };

        server.wait_for_ready().await?;

        Ok(server)
    }

    /// Wait for the server to be ready to accept connections.
    async fn wait_for_ready(&self) -> Result<()> {
        let client = Client::new();
        let url = format!("{}/health", self.base_url);

        for _ in 0..50 {
            match client.get(&url).send().await {
                Ok(resp) if resp.status().is_success() => return Ok(()),
                _ => tokio::time::sleep(Duration::from_millis(20)).await,
            }
        }

        bail!("Server failed to start within 1 second")
    }

    /// Get a configured HTTP client for this server.
    pub fn client(&self) -> ArcanumClient {
        ArcanumClient::new(&self.base_url)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// ============================================================================
// Test Client
// ============================================================================

/// HTTP client for testing the Arcanum API.
pub struct ArcanumClient {
    client: Client,
    base_url: String,
}

impl ArcanumClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(60))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn banner(&self) -> Result<String> {
        let resp = self.client.get(self.url("/")).send().await?;
        Ok(resp.text().await?)
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        let resp = self.client.get(self.url("/health")).send().await?;
        Ok(resp.json().await?)
    }

    /// Posts a JSON body; a non-2xx answer comes back as `Err(ApiFailure)`.
    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<std::result::Result<T, ApiFailure>> {
        let resp = self.client.post(self.url(path)).json(&body).send().await?;
        let status = resp.status();

        if !status.is_success() {
            let error: ErrorResponse = resp.json().await.context("Error body is not JSON")?;
            return Ok(Err(ApiFailure {
                status,
                error: error.error,
            }));
        }

        Ok(Ok(resp.json().await?))
    }

    pub async fn generate_key(&self, key_type: &str, key_size: u32) -> Result<GenerateKeyResponse> {
        let req = GenerateKeyRequest {
            key_type: key_type.to_string(),
            key_size,
        };
        self.post("/generate-key", serde_json::to_value(req)?)
            .await?
            .map_err(|f| anyhow::anyhow!("Generate key failed: {:?}", f))
    }

    pub async fn encrypt(
        &self,
        key_id: &str,
        plaintext: &str,
        algorithm: &str,
    ) -> Result<std::result::Result<EncryptResponse, ApiFailure>> {
        self.post(
            "/encrypt",
            serde_json::json!({"key_id": key_id, "plaintext": plaintext, "algorithm": algorithm}),
        )
        .await
    }

    pub async fn decrypt(
        &self,
        key_id: &str,
        ciphertext: &str,
        algorithm: &str,
    ) -> Result<std::result::Result<DecryptResponse, ApiFailure>> {
        self.post(
            "/decrypt",
            serde_json::json!({"key_id": key_id, "ciphertext": ciphertext, "algorithm": algorithm}),
        )
        .await
    }

    pub async fn hash(
        &self,
        data: &str,
        algorithm: &str,
    ) -> Result<std::result::Result<HashResponse, ApiFailure>> {
        self.post(
            "/generate-hash",
            serde_json::json!({"data": data, "algorithm": algorithm}),
        )
        .await
    }

    pub async fn verify_hash(
        &self,
        data: &str,
        hash_value: &str,
        algorithm: &str,
    ) -> Result<std::result::Result<VerifyHashResponse, ApiFailure>> {
        self.post(
            "/verify-hash",
            serde_json::json!({"data": data, "hash_value": hash_value, "algorithm": algorithm}),
        )
        .await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_banner_and_health() {
        let server = TestServer::start().await.unwrap();
        let client = server.client();

        assert_eq!(
            client.banner().await.unwrap(),
            "Harry Potter, The Boy Who Lived.!!"
        );

        let health = client.health().await.unwrap();
        assert_eq!(health.status, "ok");
        assert!(!health.version.is_empty());
        assert_eq!(health.keys, 0);
    }

    #[tokio::test]
    async fn test_hogwarts_workflow() {
        let server = TestServer::start().await.unwrap();
        let client = server.client();

        // 1. First key on a fresh server is "1"
        let key = client.generate_key("AES", 128).await.unwrap();
        assert_eq!(key.key_id, "1");
        assert!(key.key_value.is_some());

        // 2. Encrypt
        let encrypted = client
            .encrypt(&key.key_id, "Hogwarts", "AES")
            .await
            .unwrap()
            .unwrap();
        assert_ne!(encrypted.ciphertext, "Hogwarts");

        // 3. Decrypt
        let decrypted = client
            .decrypt(&key.key_id, &encrypted.ciphertext, "AES")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(decrypted.plaintext, "Hogwarts");

        // 4. Same plaintext encrypts differently (fresh IV)
        let again = client
            .encrypt(&key.key_id, "Hogwarts", "AES")
            .await
            .unwrap()
            .unwrap();
        assert_ne!(again.ciphertext, encrypted.ciphertext);

        // 5. Key is counted
        assert_eq!(client.health().await.unwrap().keys, 1);
    }

    #[tokio::test]
    async fn test_aes_sizes_and_long_text() {
        let server = TestServer::start().await.unwrap();
        let client = server.client();
        let text = "Mischief managed. ".repeat(200);

        for size in [128, 192, 256] {
            let key = client.generate_key("AES", size).await.unwrap();
            let encrypted = client
                .encrypt(&key.key_id, &text, "AES")
                .await
                .unwrap()
                .unwrap();
            let decrypted = client
                .decrypt(&key.key_id, &encrypted.ciphertext, "AES")
                .await
                .unwrap()
                .unwrap();
            assert_eq!(decrypted.plaintext, text);
        }
    }

    #[tokio::test]
    async fn test_rsa_workflow() {
        let server = TestServer::start().await.unwrap();
        let client = server.client();

        let key = client.generate_key("RSA", 2048).await.unwrap();
        assert!(key.private_key.is_some());
        assert!(key.public_key.is_some());
        assert!(key.key_value.is_none());

        let encrypted = client
            .encrypt(&key.key_id, "Expecto Patronum", "RSA")
            .await
            .unwrap()
            .unwrap();
        let decrypted = client
            .decrypt(&key.key_id, &encrypted.ciphertext, "RSA")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(decrypted.plaintext, "Expecto Patronum");

        let too_large = client
            .encrypt(&key.key_id, &"x".repeat(127), "RSA")
            .await
            .unwrap()
            .unwrap_err();
        assert_eq!(too_large.status, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_error_statuses() {
        let server = TestServer::start().await.unwrap();
        let client = server.client();

        // Invalid key size
        let failure = client
            .post::<GenerateKeyResponse>(
                "/generate-key",
                serde_json::json!({"key_type": "RSA", "key_size": 1024}),
            )
            .await
            .unwrap()
            .unwrap_err();
        assert_eq!(failure.status, StatusCode::BAD_REQUEST);

        // Unknown key
        let failure = client
            .encrypt("42", "Hogwarts", "AES")
            .await
            .unwrap()
            .unwrap_err();
        assert_eq!(failure.status, StatusCode::NOT_FOUND);
        assert_eq!(failure.error, "Key not found");

        let failure = client
            .decrypt("42", "AAAA", "AES")
            .await
            .unwrap()
            .unwrap_err();
        assert_eq!(failure.status, StatusCode::NOT_FOUND);

        // Garbage ciphertext
        let key = client.generate_key("AES", 128).await.unwrap();
        let failure = client
            .decrypt(&key.key_id, "%%%", "AES")
            .await
            .unwrap()
            .unwrap_err();
        assert_eq!(failure.status, StatusCode::BAD_REQUEST);

        // Missing field
        let failure = client
            .post::<EncryptResponse>("/encrypt", serde_json::json!({"key_id": key.key_id}))
            .await
            .unwrap()
            .unwrap_err();
        assert_eq!(failure.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_hash_workflow() {
        let server = TestServer::start().await.unwrap();
        let client = server.client();

        for algorithm in ["SHA-256", "SHA-512"] {
            let hashed = client.hash("Alohomora", algorithm).await.unwrap().unwrap();
            assert_eq!(hashed.algorithm, algorithm);

            let verdict = client
                .verify_hash("Alohomora", &hashed.hash_value, algorithm)
                .await
                .unwrap()
                .unwrap();
            assert!(verdict.is_valid);
            assert_eq!(verdict.message, "Hash matches the data.");

            let verdict = client
                .verify_hash("alohomora", &hashed.hash_value, algorithm)
                .await
                .unwrap()
                .unwrap();
            assert!(!verdict.is_valid);
            assert_eq!(verdict.message, "Hash does not match the data.");
        }

        let failure = client.hash("x", "MD5").await.unwrap().unwrap_err();
        assert_eq!(failure.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_concurrent_key_generation_yields_distinct_ids() {
        let server = TestServer::start().await.unwrap();

        let mut tasks = Vec::new();
        for _ in 0..16 {
            let client = server.client();
            tasks.push(tokio::spawn(async move {
                client.generate_key("AES", 128).await.unwrap().key_id
            }));
        }

        let mut ids = Vec::new();
        for task in tasks {
            ids.push(task.await.unwrap());
        }
        ids.sort();
        ids.dedup();

        assert_eq!(ids.len(), 16);
        assert_eq!(server.client().health().await.unwrap().keys, 16);
    }
}
