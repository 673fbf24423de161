//! Expiring key-value storage for issued nonces.

pub mod memory;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use memory::MemoryNonceStore;

/// Namespace every nonce key lives under.
pub const NONCE_PREFIX: &str = "nonce:";

pub fn nonce_key(identity: &str) -> String {
    format!("{NONCE_PREFIX}{identity}")
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("key not found")]
    NotFound,
    #[error("key expired")]
    Expired,
    #[error("store operation timed out after {0:?}")]
    Timeout(Duration),
    #[error("store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// True when the key simply holds no live value.
    pub fn is_missing(&self) -> bool {
        matches!(self, StoreError::NotFound | StoreError::Expired)
    }
}

/// An expiring map from identity keys to nonces.
///
/// Writes overwrite: the last `put` for a key wins. Expiry is enforced by the
/// store itself, callers never poll.
#[async_trait]
pub trait NonceStore: Send + Sync {
    async fn put(&self, key: &str, value: String, ttl: Duration) -> Result<(), StoreError>;

    async fn get(&self, key: &str) -> Result<String, StoreError>;

    /// Atomically removes the value and returns it.
    async fn consume(&self, key: &str) -> Result<String, StoreError>;
}
