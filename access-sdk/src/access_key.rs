use ed25519_dalek::{SigningKey, VerifyingKey, SECRET_KEY_LENGTH};
use rand::rngs::OsRng;

use crate::errors::SdkErrors;

/// Ed25519 keypair identifying a wallet to the access service.
#[derive(Debug, Clone)]
pub struct AccessKey(pub SigningKey);

impl AccessKey {
    pub fn generate() -> Self {
        Self(SigningKey::generate(&mut OsRng))
    }

    /// Parses a 32-byte secret key, with or without a `0x` prefix.
    pub fn from_hex_string(hex_string: &str) -> Result<Self, SdkErrors> {
        let trimmed = hex_string.trim();
        let trimmed = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let bytes = hex::decode(trimmed).map_err(|e| SdkErrors::InvalidAccessKey(e.to_string()))?;
        let secret: [u8; SECRET_KEY_LENGTH] = bytes.try_into().map_err(|bytes: Vec<u8>| {
            SdkErrors::InvalidAccessKey(format!(
                "expected {SECRET_KEY_LENGTH} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self(SigningKey::from_bytes(&secret)))
    }

    pub fn verifying_key(&self) -> VerifyingKey {
        self.0.verifying_key()
    }

    /// Base58 public key, the identity the service knows this wallet by.
    pub fn address(&self) -> String {
        bs58::encode(self.verifying_key().as_bytes()).into_string()
    }

    pub fn secret_hex(&self) -> String {
        hex::encode(self.0.to_bytes())
    }

    pub fn sign_nonce(&self, nonce: &str) -> String {
        common::sign_nonce(&self.0, nonce)
    }
}
