use std::net::AddrParseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("server error")]
    Server(#[from] std::io::Error),

    #[error("failed to parse address")]
    AddressParse(#[from] AddrParseError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to build ledger client")]
    LedgerClient(#[from] reqwest::Error),
}
