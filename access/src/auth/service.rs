//! The two-phase challenge/login protocol.

use std::{future::Future, sync::Arc, time::Duration};

use chrono::Utc;
use tracing::{info, warn};

use super::{
    auth_errors::AuthError,
    jwt::{encode_jwt, Keys},
    nonce::{is_well_formed, Nonce},
    signature::verify_signed_nonce,
};
use crate::{
    config::AuthConfig,
    ledger::{Ledger, Pubkey},
    stake::StakeVerifier,
    store::{nonce_key, NonceStore, StoreError},
};

pub struct AuthService {
    store: Arc<dyn NonceStore>,
    stake: StakeVerifier,
    keys: Keys,
    nonce_ttl: Duration,
    token_ttl: Duration,
    store_timeout: Duration,
}

impl AuthService {
    pub fn new(store: Arc<dyn NonceStore>, ledger: Arc<dyn Ledger>, config: &AuthConfig) -> Self {
        Self {
            store,
            stake: StakeVerifier::new(ledger, &config.stake),
            keys: Keys::new(config.jwt_secret_key.as_bytes()),
            nonce_ttl: config.nonce_ttl,
            token_ttl: config.token_ttl,
            store_timeout: config.store_timeout,
        }
    }

    /// Issues a fresh nonce for `address`, replacing any outstanding one.
    pub async fn request_nonce(&self, address: &str) -> Result<Nonce, AuthError> {
        if address.parse::<Pubkey>().is_err() {
            info!(address, "nonce requested for invalid address");
            return Err(AuthError::MalformedRequest);
        }

        let nonce = Nonce::generate().map_err(|e| {
            warn!(error = %e, "entropy source failed");
            AuthError::NonceGeneration(e)
        })?;

        self.with_timeout(self.store.put(&nonce_key(address), nonce.to_string(), self.nonce_ttl))
            .await
            .map_err(|e| {
                warn!(address, error = %e, "failed to store nonce");
                AuthError::StoreUnavailable(e)
            })?;

        info!(address, "nonce issued");
        Ok(nonce)
    }

    /// Runs the login checks in order and returns a signed token.
    ///
    /// The stored nonce is consumed up front, so it cannot be retried whatever
    /// the outcome.
    pub async fn login(&self, address: &str, signed_nonce: &str) -> Result<String, AuthError> {
        let nonce = self
            .with_timeout(self.store.consume(&nonce_key(address)))
            .await
            .map_err(|e| {
                if e.is_missing() {
                    info!(address, reason = %e, "login without a live nonce");
                    AuthError::InvalidNonce
                } else {
                    warn!(address, error = %e, "failed to read nonce");
                    AuthError::StoreUnavailable(e)
                }
            })?;

        if !is_well_formed(&nonce) {
            warn!(address, "stored nonce is malformed");
            return Err(AuthError::InvalidNonce);
        }

        if !verify_signed_nonce(&nonce, signed_nonce, address) {
            info!(address, "invalid signature");
            return Err(AuthError::InvalidSignature);
        }

        if !self.stake.check_stake(address).await {
            info!(address, "insufficient stake");
            return Err(AuthError::InsufficientStake);
        }

        let token = encode_jwt(address, Utc::now(), self.token_ttl, &self.keys).map_err(|e| {
            warn!(address, error = %e, "failed to sign token");
            AuthError::Issuance(e)
        })?;

        info!(address, "login succeeded");
        Ok(token)
    }

    async fn with_timeout<T>(
        &self,
        operation: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        tokio::time::timeout(self.store_timeout, operation)
            .await
            .map_err(|_| StoreError::Timeout(self.store_timeout))?
    }
}
