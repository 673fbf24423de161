use reqwest::{header::AUTHORIZATION, Client};
use url::Url;

use crate::{
    access_key::AccessKey,
    errors::SdkErrors,
    sdk_builder::{read_envelope, AccessSdkBuilder},
};

/// An authenticated client for the access service.
#[derive(Debug, Clone)]
pub struct AccessSdk {
    pub client: Client,
    pub article: Url,
    pub jwt_token: String,
    pub authority: AccessKey,
}

impl AccessSdk {
    pub async fn new(url: Url, access_key: AccessKey) -> Result<Self, SdkErrors> {
        AccessSdkBuilder::new(url).auth(access_key).await?.build()
    }

    pub async fn article(&self) -> Result<String, SdkErrors> {
        let response = self
            .client
            .get(self.article.clone())
            .header(AUTHORIZATION, format!("Bearer {}", self.jwt_token))
            .send()
            .await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await?;
            tracing::error!(status, "{}", message);
            return Err(SdkErrors::Rejected { status, message });
        }
        read_envelope(response).await
    }
}
