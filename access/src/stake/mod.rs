//! Stake-based authorization.
//!
//! A login is authorized when the caller's stake account holds more than the
//! pool minimum recorded when the account was opened, or more than the pool's
//! current minimum. Anything that prevents reading that state denies access.

pub mod layout;

use std::{future::Future, sync::Arc, time::Duration};

use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    config::StakeConfig,
    ledger::{find_program_address, Ledger, LedgerError, ParsePubkeyError, PdaError, Pubkey},
};
use layout::{LayoutError, StakeAccountView, StakePoolView};

pub const STAKE_ACCOUNT_SEED: &[u8] = b"stake_account";

#[derive(Debug, Error)]
pub enum StakeError {
    #[error("invalid owner address")]
    InvalidOwner(#[from] ParsePubkeyError),
    #[error("failed to derive stake account address")]
    Derivation(#[from] PdaError),
    #[error("ledger read failed")]
    Ledger(#[from] LedgerError),
    #[error("unreadable account data")]
    Layout(#[from] LayoutError),
}

/// The authorization policy: strictly greater than either threshold.
pub fn meets_minimum(stake_amount: u64, creation_minimum: u64, pool_minimum: Option<u64>) -> bool {
    stake_amount > creation_minimum || pool_minimum.is_some_and(|minimum| stake_amount > minimum)
}

#[derive(Clone)]
pub struct StakeVerifier {
    ledger: Arc<dyn Ledger>,
    stake_pool: Pubkey,
    program_id: Pubkey,
    check_pool_minimum: bool,
    timeout: Duration,
}

impl StakeVerifier {
    pub fn new(ledger: Arc<dyn Ledger>, config: &StakeConfig) -> Self {
        Self {
            ledger,
            stake_pool: config.stake_pool,
            program_id: config.program_id,
            check_pool_minimum: config.check_pool_minimum,
            timeout: config.ledger_timeout,
        }
    }

    pub fn stake_account_address(&self, owner: &Pubkey) -> Result<Pubkey, PdaError> {
        let seeds: &[&[u8]] = &[STAKE_ACCOUNT_SEED, owner.as_ref(), self.stake_pool.as_ref()];
        find_program_address(seeds, &self.program_id).map(|(address, _)| address)
    }

    /// Fail-closed stake check: every error resolves to `false`.
    pub async fn check_stake(&self, identity: &str) -> bool {
        match self.evaluate(identity).await {
            Ok(authorized) => authorized,
            Err(e) => {
                warn!(identity, error = ?e, "stake check failed");
                false
            }
        }
    }

    async fn evaluate(&self, identity: &str) -> Result<bool, StakeError> {
        let owner: Pubkey = identity.parse()?;
        let address = self.stake_account_address(&owner)?;
        let account = StakeAccountView::parse(&self.fetch(&address).await?)?;
        debug!(
            identity,
            stake_amount = account.stake_amount,
            pool_minimum_at_creation = account.pool_minimum_at_creation,
            "stake account loaded"
        );

        if meets_minimum(account.stake_amount, account.pool_minimum_at_creation, None) {
            return Ok(true);
        }
        if !self.check_pool_minimum {
            return Ok(false);
        }

        let pool = StakePoolView::parse(&self.fetch(&self.stake_pool).await?)?;
        debug!(
            minimum_stake_amount = pool.minimum_stake_amount,
            "stake pool loaded"
        );
        Ok(meets_minimum(
            account.stake_amount,
            account.pool_minimum_at_creation,
            Some(pool.minimum_stake_amount),
        ))
    }

    async fn fetch(&self, address: &Pubkey) -> Result<Vec<u8>, LedgerError> {
        with_timeout(self.timeout, self.ledger.get_account_data(address)).await
    }
}

async fn with_timeout<T>(
    budget: Duration,
    operation: impl Future<Output = Result<T, LedgerError>>,
) -> Result<T, LedgerError> {
    tokio::time::timeout(budget, operation)
        .await
        .map_err(|_| LedgerError::Timeout(budget))?
}
