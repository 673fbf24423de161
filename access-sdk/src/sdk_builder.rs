use common::{
    models::{ApiResponse, LoginResponse, NonceResponse},
    requests::{LoginRequest, NonceRequest},
};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::{access_key::AccessKey, errors::SdkErrors, sdk::AccessSdk};

#[derive(Debug)]
pub struct AccessSdkBuilder {
    client: Client,
    base_url: Url,
    access_key: Option<AccessKey>,
    jwt_token: Option<String>,
}

impl AccessSdkBuilder {
    pub fn new(base_url: Url) -> Self {
        AccessSdkBuilder {
            client: Client::new(),
            base_url,
            access_key: None,
            jwt_token: None,
        }
    }

    pub async fn get_nonce(&self, address: &str) -> Result<String, SdkErrors> {
        let url = self.base_url.join("auth/nonce")?;
        debug!(%url, address, "requesting nonce");
        let response = self
            .client
            .post(url)
            .json(&NonceRequest {
                address: address.to_string(),
            })
            .send()
            .await?;
        let NonceResponse { nonce } = read_envelope(response).await?;
        Ok(nonce)
    }

    pub async fn login(&self, address: &str, signed_nonce: String) -> Result<String, SdkErrors> {
        let url = self.base_url.join("auth/login")?;
        debug!(%url, address, "logging in");
        let response = self
            .client
            .post(url)
            .json(&LoginRequest {
                address: address.to_string(),
                signed_nonce,
            })
            .send()
            .await?;
        let LoginResponse { token } = read_envelope(response).await?;
        Ok(token)
    }

    /// Runs the challenge/login exchange and keeps the issued token.
    pub async fn auth(mut self, access_key: AccessKey) -> Result<Self, SdkErrors> {
        let address = access_key.address();
        let nonce = self.get_nonce(&address).await?;
        let token = self.login(&address, access_key.sign_nonce(&nonce)).await?;
        self.jwt_token = Some(token);
        self.access_key = Some(access_key);
        Ok(self)
    }

    pub fn build(self) -> Result<AccessSdk, SdkErrors> {
        match (self.access_key, self.jwt_token) {
            (Some(access_key), Some(jwt_token)) => Ok(AccessSdk {
                client: self.client,
                article: self.base_url.join("article")?,
                jwt_token,
                authority: access_key,
            }),
            _ => Err(SdkErrors::NotAuthenticated),
        }
    }
}

/// Unwraps a `{success, result}` body, turning failures into [`SdkErrors::Rejected`].
pub(crate) async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<T, SdkErrors> {
    let status = response.status();
    let text = response.text().await?;
    let envelope: ApiResponse<Value> = match serde_json::from_str(&text) {
        Ok(envelope) => envelope,
        Err(_) if !status.is_success() => {
            return Err(SdkErrors::Rejected {
                status: status.as_u16(),
                message: text,
            })
        }
        Err(e) => return Err(e.into()),
    };
    if !envelope.success || !status.is_success() {
        let message = match envelope.result {
            Value::String(message) => message,
            other => other.to_string(),
        };
        return Err(SdkErrors::Rejected {
            status: status.as_u16(),
            message,
        });
    }
    Ok(serde_json::from_value(envelope.result)?)
}
