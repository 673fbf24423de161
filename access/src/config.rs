use std::{fmt, time::Duration};

use url::Url;

use crate::{errors::ServerError, ledger::Pubkey, Args};

/// Shortest accepted HMAC secret. HS256 keys below the digest size are rejected at startup.
pub const MIN_SECRET_LEN: usize = 32;

/// Immutable runtime configuration, built once from [`Args`] before the server starts.
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret_key: String,
    pub nonce_ttl: Duration,
    pub token_ttl: Duration,
    pub store_timeout: Duration,
    pub stake: StakeConfig,
}

#[derive(Debug, Clone)]
pub struct StakeConfig {
    pub rpc_url: Url,
    pub stake_pool: Pubkey,
    pub program_id: Pubkey,
    pub check_pool_minimum: bool,
    pub ledger_timeout: Duration,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret_key", &"<redacted>")
            .field("nonce_ttl", &self.nonce_ttl)
            .field("token_ttl", &self.token_ttl)
            .field("store_timeout", &self.store_timeout)
            .field("stake", &self.stake)
            .finish()
    }
}

impl TryFrom<&Args> for AuthConfig {
    type Error = ServerError;

    fn try_from(args: &Args) -> Result<Self, Self::Error> {
        let jwt_secret_key = args.jwt_secret_key.trim();
        if jwt_secret_key.len() < MIN_SECRET_LEN {
            return Err(ServerError::Config(format!(
                "jwt secret key must be at least {MIN_SECRET_LEN} bytes"
            )));
        }

        let stake_pool = args
            .stake_pool
            .parse::<Pubkey>()
            .map_err(|e| ServerError::Config(format!("stake pool: {e}")))?;
        let program_id = args
            .program_id
            .parse::<Pubkey>()
            .map_err(|e| ServerError::Config(format!("program id: {e}")))?;

        let seconds = |name: &str, value: u64| {
            if value == 0 {
                Err(ServerError::Config(format!("{name} must be greater than zero")))
            } else {
                Ok(Duration::from_secs(value))
            }
        };

        Ok(Self {
            jwt_secret_key: jwt_secret_key.to_string(),
            nonce_ttl: seconds("nonce expiration time", args.nonce_expiration_time)?,
            token_ttl: seconds("session expiration time", args.session_expiration_time)?,
            store_timeout: seconds("store timeout", args.store_timeout)?,
            stake: StakeConfig {
                rpc_url: args.rpc_url.clone(),
                stake_pool,
                program_id,
                check_pool_minimum: args.check_pool_minimum,
                ledger_timeout: seconds("ledger timeout", args.ledger_timeout)?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    const POOL: &str = "Hs6emyaDnMSxJmGxnHhSmucJh1Q9jSysuKJ5yycWoUuC";
    const PROGRAM: &str = "2ZsWiVGXzL4kgMDtSfeEJSV27fBnMptrdcNKKZygUoB8";

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec![
            "access",
            "--stake-pool",
            POOL,
            "--program-id",
            PROGRAM,
        ];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_valid_config() {
        let args = args(&["--jwt-secret-key", "0123456789abcdef0123456789abcdef"]);
        let config = AuthConfig::try_from(&args).unwrap();

        assert_eq!(config.nonce_ttl, Duration::from_secs(600));
        assert_eq!(config.token_ttl, Duration::from_secs(86400));
        assert_eq!(config.store_timeout, Duration::from_secs(10));
        assert_eq!(config.stake.ledger_timeout, Duration::from_secs(10));
        assert_eq!(config.stake.stake_pool.to_string(), POOL);
        assert!(config.stake.check_pool_minimum);
    }

    #[test]
    fn test_short_secret_is_fatal() {
        let args = args(&["--jwt-secret-key", "too-short"]);
        assert!(matches!(
            AuthConfig::try_from(&args),
            Err(ServerError::Config(_))
        ));
    }

    #[test]
    fn test_blank_secret_is_fatal() {
        let args = args(&["--jwt-secret-key", &" ".repeat(40)]);
        assert!(matches!(
            AuthConfig::try_from(&args),
            Err(ServerError::Config(_))
        ));
    }

    #[test]
    fn test_invalid_stake_pool_is_fatal() {
        let args = Args::parse_from([
            "access",
            "--jwt-secret-key",
            "0123456789abcdef0123456789abcdef",
            "--stake-pool",
            "not-base58-0OIl",
            "--program-id",
            PROGRAM,
        ]);
        assert!(matches!(
            AuthConfig::try_from(&args),
            Err(ServerError::Config(_))
        ));
    }

    #[test]
    fn test_pool_minimum_can_be_disabled() {
        let args = args(&[
            "--jwt-secret-key",
            "0123456789abcdef0123456789abcdef",
            "--check-pool-minimum",
            "false",
        ]);
        let config = AuthConfig::try_from(&args).unwrap();
        assert!(!config.stake.check_pool_minimum);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let args = args(&["--jwt-secret-key", "0123456789abcdef0123456789abcdef"]);
        let config = AuthConfig::try_from(&args).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("0123456789abcdef"));
    }
}
