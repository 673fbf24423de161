pub mod article;
pub mod auth;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod server;
pub mod stake;
pub mod store;
pub mod utils;

#[cfg(any(test, feature = "testutil"))]
pub mod testutil;

use clap::{ArgAction, Parser};
use url::Url;

/// Command line arguments for the server
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    #[arg(long, env, default_value = "0.0.0.0")]
    pub host: String,
    #[arg(long, short, env, default_value = "3001")]
    pub port: u16,
    #[arg(long, short, env, hide_env_values = true)]
    pub jwt_secret_key: String,
    /// Seconds a nonce stays valid after it is issued
    #[arg(long, short, env, default_value = "600")]
    pub nonce_expiration_time: u64,
    /// Seconds an issued token stays valid
    #[arg(long, short, env, default_value = "86400")]
    pub session_expiration_time: u64,
    /// Budget in seconds for a single nonce store operation
    #[arg(long, env, default_value = "10")]
    pub store_timeout: u64,
    /// Budget in seconds for a single ledger RPC call
    #[arg(long, env, default_value = "10")]
    pub ledger_timeout: u64,
    #[arg(long, env, default_value = "https://api.devnet.solana.com")]
    pub rpc_url: Url,
    /// Base58 address of the stake pool
    #[arg(long, env)]
    pub stake_pool: String,
    /// Base58 address of the staking program
    #[arg(long, env)]
    pub program_id: String,
    /// Also accept stakes above the pool's current minimum
    #[arg(long, env, default_value_t = true, action = ArgAction::Set)]
    pub check_pool_minimum: bool,
}
