//! Read-only access to the external ledger.
//!
//! The service only ever reads raw account blobs; everything it knows about an
//! account's layout lives in [`crate::stake::layout`].

pub mod pda;
pub mod pubkey;
pub mod rpc;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use pda::{find_program_address, PdaError};
pub use pubkey::{ParsePubkeyError, Pubkey};
pub use rpc::RpcLedger;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("account {0} not found")]
    AccountNotFound(Pubkey),

    #[error("ledger request timed out after {0:?}")]
    Timeout(Duration),

    #[error("rpc transport error")]
    Transport(#[from] reqwest::Error),

    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("malformed rpc response: {0}")]
    MalformedResponse(String),
}

/// Fetches raw account data by address.
#[async_trait]
pub trait Ledger: Send + Sync {
    async fn get_account_data(&self, address: &Pubkey) -> Result<Vec<u8>, LedgerError>;
}
