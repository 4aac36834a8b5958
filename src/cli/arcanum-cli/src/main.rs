//! Arcanum CLI - Command line interface.

use std::io::{self, Read};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// ============================================================================
// CLI Structure
// ============================================================================

#[derive(Parser)]
#[command(name = "arcanum")]
#[command(about = "Arcanum CLI - Generate keys, encrypt, decrypt and hash")]
#[command(version)]
struct Cli {
    /// Arcanum server address
    #[arg(long, default_value = "http://localhost:5000", env = "ARCANUM_ADDR")]
    addr: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Key management
    Key {
        #[command(subcommand)]
        command: KeyCommands,
    },
    /// Encrypt text with a stored key
    Encrypt {
        /// Key identifier
        #[arg(long)]
        key_id: String,
        /// Cipher (AES, RSA)
        #[arg(long, default_value = "AES")]
        algorithm: String,
        /// Text to encrypt (read from stdin if not provided)
        plaintext: Option<String>,
    },
    /// Decrypt a ciphertext with a stored key
    Decrypt {
        /// Key identifier
        #[arg(long)]
        key_id: String,
        /// Cipher (AES, RSA)
        #[arg(long, default_value = "AES")]
        algorithm: String,
        /// Base64 ciphertext
        ciphertext: String,
    },
    /// Compute a digest
    Hash {
        /// Hash algorithm (SHA-256, SHA-512)
        #[arg(long, default_value = "SHA-256")]
        algorithm: String,
        /// Text to hash (read from stdin if not provided)
        data: Option<String>,
    },
    /// Check a digest against text
    VerifyHash {
        /// Hash algorithm (SHA-256, SHA-512)
        #[arg(long, default_value = "SHA-256")]
        algorithm: String,
        /// Expected base64 digest
        #[arg(long)]
        hash_value: String,
        /// Text to check
        data: String,
    },
    /// Check server status
    Status,
}

#[derive(Subcommand)]
enum KeyCommands {
    /// Generate a new key
    Generate {
        /// Key type (AES, RSA)
        #[arg(long = "type")]
        key_type: String,
        /// Key size in bits
        #[arg(long)]
        size: u32,
    },
}

// ============================================================================
// API Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct HealthResponse {
    status: String,
    version: String,
    keys: usize,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Serialize)]
struct GenerateKeyRequest<'a> {
    key_type: &'a str,
    key_size: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateKeyResponse {
    key_id: String,
    key_value: Option<String>,
    private_key: Option<String>,
    public_key: Option<String>,
}

#[derive(Serialize)]
struct EncryptRequest<'a> {
    key_id: &'a str,
    plaintext: &'a str,
    algorithm: &'a str,
}

#[derive(Debug, Deserialize)]
struct EncryptResponse {
    ciphertext: String,
}

#[derive(Serialize)]
struct DecryptRequest<'a> {
    key_id: &'a str,
    ciphertext: &'a str,
    algorithm: &'a str,
}

#[derive(Debug, Deserialize)]
struct DecryptResponse {
    plaintext: String,
}

#[derive(Serialize)]
struct HashRequest<'a> {
    data: &'a str,
    algorithm: &'a str,
}

#[derive(Debug, Deserialize)]
struct HashResponse {
    hash_value: String,
    algorithm: String,
}

#[derive(Serialize)]
struct VerifyHashRequest<'a> {
    data: &'a str,
    hash_value: &'a str,
    algorithm: &'a str,
}

#[derive(Debug, Deserialize)]
struct VerifyHashResponse {
    is_valid: bool,
    message: String,
}

// ============================================================================
// HTTP Client
// ============================================================================

struct ArcanumClient {
    client: Client,
    base_url: String,
}

impl ArcanumClient {
    fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_health(&self) -> Result<HealthResponse> {
        let resp = self
            .client
            .get(self.url("/health"))
            .send()
            .await
            .context("Failed to connect to server")?;

        parse(resp, "Status check failed").await
    }

    async fn post<Req, Resp>(&self, path: &str, body: &Req, action: &str) -> Result<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .context("Failed to connect to server")?;

        parse(resp, action).await
    }

    async fn generate_key(&self, key_type: &str, key_size: u32) -> Result<GenerateKeyResponse> {
        let req = GenerateKeyRequest { key_type, key_size };
        self.post("/generate-key", &req, "Key generation failed")
            .await
    }

    async fn encrypt(&self, key_id: &str, algorithm: &str, plaintext: &str) -> Result<String> {
        let req = EncryptRequest {
            key_id,
            plaintext,
            algorithm,
        };
        let resp: EncryptResponse = self.post("/encrypt", &req, "Encryption failed").await?;
        Ok(resp.ciphertext)
    }

    async fn decrypt(&self, key_id: &str, algorithm: &str, ciphertext: &str) -> Result<String> {
        let req = DecryptRequest {
            key_id,
            ciphertext,
            algorithm,
        };
        let resp: DecryptResponse = self.post("/decrypt", &req, "Decryption failed").await?;
        Ok(resp.plaintext)
    }

    async fn hash(&self, algorithm: &str, data: &str) -> Result<HashResponse> {
        let req = HashRequest { data, algorithm };
        self.post("/generate-hash", &req, "Hashing failed").await
    }

    async fn verify_hash(
        &self,
        algorithm: &str,
        data: &str,
        hash_value: &str,
    ) -> Result<VerifyHashResponse> {
        let req = VerifyHashRequest {
            data,
            hash_value,
            algorithm,
        };
        self.post("/verify-hash", &req, "Hash verification failed")
            .await
    }
}

async fn parse<T: DeserializeOwned>(resp: Response, action: &str) -> Result<T> {
    if !resp.status().is_success() {
        let status = resp.status();
        let error: ErrorResponse = resp.json().await.unwrap_or(ErrorResponse {
            error: format!("HTTP {}", status),
        });
        bail!("{}: {}", action, error.error);
    }

    resp.json().await.context("Failed to parse response")
}

// ============================================================================
// Command Handlers
// ============================================================================

async fn cmd_status(client: &ArcanumClient) -> Result<()> {
    let health = client.get_health().await?;

    println!("Arcanum server status:");
    println!("  Status:  {}", health.status);
    println!("  Version: {}", health.version);
    println!("  Keys:    {}", health.keys);

    Ok(())
}

async fn cmd_key_generate(client: &ArcanumClient, key_type: &str, size: u32) -> Result<()> {
    let key = client.generate_key(key_type, size).await?;

    println!("Key ID: {}", key.key_id);
    if let Some(value) = key.key_value {
        println!("Key:    {}", value);
    }
    if let Some(public_key) = key.public_key {
        println!("Public key (SPKI DER, base64):");
        println!("{}", public_key);
    }
    if let Some(private_key) = key.private_key {
        println!("Private key (PKCS#8 DER, base64, unencrypted):");
        println!("{}", private_key);
    }

    Ok(())
}

async fn cmd_encrypt(
    client: &ArcanumClient,
    key_id: &str,
    algorithm: &str,
    plaintext: Option<String>,
) -> Result<()> {
    let plaintext = input_or_stdin(plaintext)?;
    println!("{}", client.encrypt(key_id, algorithm, &plaintext).await?);
    Ok(())
}

async fn cmd_decrypt(
    client: &ArcanumClient,
    key_id: &str,
    algorithm: &str,
    ciphertext: &str,
) -> Result<()> {
    println!("{}", client.decrypt(key_id, algorithm, ciphertext).await?);
    Ok(())
}

async fn cmd_hash(client: &ArcanumClient, algorithm: &str, data: Option<String>) -> Result<()> {
    let data = input_or_stdin(data)?;
    let result = client.hash(algorithm, &data).await?;
    println!("{} {}", result.algorithm, result.hash_value);
    Ok(())
}

async fn cmd_verify_hash(
    client: &ArcanumClient,
    algorithm: &str,
    data: &str,
    hash_value: &str,
) -> Result<()> {
    let verdict = client.verify_hash(algorithm, data, hash_value).await?;

    println!("{}", verdict.message);
    if !verdict.is_valid {
        std::process::exit(1);
    }

    Ok(())
}

/// Uses the argument when given, otherwise the whole of stdin.
fn input_or_stdin(arg: Option<String>) -> Result<String> {
    match arg {
        Some(value) => Ok(value),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        },
    }
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = ArcanumClient::new(&cli.addr)?;

    match cli.command {
        Commands::Status => cmd_status(&client).await,
        Commands::Key { command } => match command {
            KeyCommands::Generate { key_type, size } => {
                cmd_key_generate(&client, &key_type, size).await
            },
        },
        Commands::Encrypt {
            key_id,
            algorithm,
            plaintext,
        } => cmd_encrypt(&client, &key_id, &algorithm, plaintext).await,
        Commands::Decrypt {
            key_id,
            algorithm,
            ciphertext,
        } => cmd_decrypt(&client, &key_id, &algorithm, &ciphertext).await,
        Commands::Hash { algorithm, data } => cmd_hash(&client, &algorithm, data).await,
        Commands::VerifyHash {
            algorithm,
            hash_value,
            data,
        } => cmd_verify_hash(&client, &algorithm, &data, &hash_value).await,
    }
}
