use access_sdk::{AccessKey, AccessSdk};
use clap::Args;
use url::Url;

/// Where the service lives and which wallet to authenticate as.
#[derive(Args, Debug, Clone)]
pub struct Connection {
    #[arg(long, env, default_value = "http://localhost:3001/")]
    pub access_url: Url,
    /// Hex encoded Ed25519 secret key
    #[arg(long, env, hide_env_values = true)]
    pub access_key: String,
}

impl Connection {
    pub async fn connect(&self) -> anyhow::Result<AccessSdk> {
        let access_key = AccessKey::from_hex_string(&self.access_key)?;
        tracing::info!(address = %access_key.address(), "authenticating");
        Ok(AccessSdk::new(self.access_url.clone(), access_key).await?)
    }
}
