//! Fakes and fixtures for exercising the auth flow without a ledger node.
//!
//! Enabled for this crate's unit tests and, through the `testutil` feature,
//! for integration tests in other workspace members.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use url::Url;

use crate::{
    config::{AuthConfig, StakeConfig},
    ledger::{Ledger, LedgerError, Pubkey},
    server::AppState,
    stake::{
        layout::{POOL_MINIMUM_AT_CREATION_OFFSET, POOL_MINIMUM_STAKE_OFFSET, STAKE_AMOUNT_OFFSET},
        StakeVerifier,
    },
    store::MemoryNonceStore,
};

pub const TEST_SECRET: &str = "test-secret-key-0123456789abcdef";

/// Ledger backed by a map of address to raw account data.
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    accounts: Arc<Mutex<HashMap<Pubkey, Vec<u8>>>>,
}

impl MemoryLedger {
    pub fn insert(&self, address: Pubkey, data: Vec<u8>) {
        self.accounts
            .lock()
            .expect("ledger lock poisoned")
            .insert(address, data);
    }
}

#[async_trait]
impl Ledger for MemoryLedger {
    async fn get_account_data(&self, address: &Pubkey) -> Result<Vec<u8>, LedgerError> {
        self.accounts
            .lock()
            .expect("ledger lock poisoned")
            .get(address)
            .cloned()
            .ok_or(LedgerError::AccountNotFound(*address))
    }
}

/// Ledger whose node always answers with an error.
#[derive(Debug, Clone, Copy)]
pub struct FailingLedger;

#[async_trait]
impl Ledger for FailingLedger {
    async fn get_account_data(&self, _address: &Pubkey) -> Result<Vec<u8>, LedgerError> {
        Err(LedgerError::Rpc {
            code: -32005,
            message: "node is unhealthy".to_string(),
        })
    }
}

/// Ledger that hangs for the given duration before answering.
#[derive(Debug, Clone, Copy)]
pub struct SlowLedger(pub Duration);

#[async_trait]
impl Ledger for SlowLedger {
    async fn get_account_data(&self, address: &Pubkey) -> Result<Vec<u8>, LedgerError> {
        tokio::time::sleep(self.0).await;
        Err(LedgerError::AccountNotFound(*address))
    }
}

/// Stake account bytes laid out the way the staking program writes them.
pub fn stake_account_data(
    owner: &Pubkey,
    stake_pool: &Pubkey,
    stake_amount: u64,
    pool_minimum_at_creation: u64,
) -> Vec<u8> {
    let mut data = Vec::with_capacity(POOL_MINIMUM_AT_CREATION_OFFSET + 8 + 1);
    data.push(1); // tag
    data.extend_from_slice(owner.as_ref());
    debug_assert_eq!(data.len(), STAKE_AMOUNT_OFFSET);
    data.extend_from_slice(&stake_amount.to_le_bytes());
    data.extend_from_slice(stake_pool.as_ref());
    data.extend_from_slice(&0i64.to_le_bytes()); // last_claimed_time
    debug_assert_eq!(data.len(), POOL_MINIMUM_AT_CREATION_OFFSET);
    data.extend_from_slice(&pool_minimum_at_creation.to_le_bytes());
    data.push(0); // pending unstake requests
    data
}

/// Stake pool header bytes with the given current minimum.
pub fn stake_pool_data(minimum_stake_amount: u64) -> Vec<u8> {
    let mut data = vec![0u8; POOL_MINIMUM_STAKE_OFFSET];
    data[0] = 1; // tag
    data.extend_from_slice(&minimum_stake_amount.to_le_bytes());
    data.extend_from_slice(&0u64.to_le_bytes()); // total_staked
    data
}

pub fn test_stake_config() -> StakeConfig {
    StakeConfig {
        rpc_url: Url::parse("http://127.0.0.1:8899").expect("static url"),
        stake_pool: Pubkey::new_from_array([3; 32]),
        program_id: Pubkey::new_from_array([5; 32]),
        check_pool_minimum: true,
        ledger_timeout: Duration::from_secs(2),
    }
}

pub fn test_config() -> AuthConfig {
    AuthConfig {
        jwt_secret_key: TEST_SECRET.to_string(),
        nonce_ttl: Duration::from_secs(600),
        token_ttl: Duration::from_secs(3600),
        store_timeout: Duration::from_secs(2),
        stake: test_stake_config(),
    }
}

/// A fully wired [`AppState`] over in-memory collaborators.
#[derive(Clone)]
pub struct TestApp {
    pub state: AppState,
    pub ledger: MemoryLedger,
    pub store: MemoryNonceStore,
    pub config: AuthConfig,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: AuthConfig) -> Self {
        let ledger = MemoryLedger::default();
        let store = MemoryNonceStore::new();
        let state = AppState::new(Arc::new(store.clone()), Arc::new(ledger.clone()), &config);
        Self {
            state,
            ledger,
            store,
            config,
        }
    }

    /// Writes a stake account for `owner` at its derived address.
    pub fn fund(&self, owner: &Pubkey, stake_amount: u64, pool_minimum_at_creation: u64) {
        let verifier = StakeVerifier::new(Arc::new(self.ledger.clone()), &self.config.stake);
        let address = verifier
            .stake_account_address(owner)
            .expect("stake account address");
        self.ledger.insert(
            address,
            stake_account_data(
                owner,
                &self.config.stake.stake_pool,
                stake_amount,
                pool_minimum_at_creation,
            ),
        );
    }

    pub fn set_pool_minimum(&self, minimum_stake_amount: u64) {
        self.ledger.insert(
            self.config.stake.stake_pool,
            stake_pool_data(minimum_stake_amount),
        );
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
