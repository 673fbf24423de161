use std::time::Duration;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::auth_errors::AuthError;

pub const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Clone)]
pub struct Keys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
}

impl Keys {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub address: String,
    pub iat: i64,
    pub exp: i64,
}

pub fn encode_jwt(
    address: &str,
    issued_at: DateTime<Utc>,
    ttl: Duration,
    keys: &Keys,
) -> Result<String, jsonwebtoken::errors::Error> {
    let ttl = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
    let iat = issued_at.timestamp();
    let claims = Claims {
        address: address.to_string(),
        iat,
        exp: iat.saturating_add(ttl),
    };
    encode(&Header::new(TOKEN_ALGORITHM), &claims, &keys.encoding)
}

/// Verifies signature, algorithm and expiry.
pub fn decode_jwt(token: &str, keys: &Keys) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(TOKEN_ALGORITHM);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp"]);
    decode::<Claims>(token, &keys.decoding, &validation).map(|data| data.claims)
}

/// Splits `"<scheme> <token>"`. Anything but exactly two parts is refused.
pub fn token_from_header(value: &str) -> Option<&str> {
    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(_scheme), Some(token), None) => Some(token),
        _ => None,
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Claims
where
    Keys: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                info!("missing authorization header");
                AuthError::InvalidCredential
            })?;
        let token = token_from_header(header).ok_or_else(|| {
            info!("malformed authorization header");
            AuthError::InvalidCredential
        })?;

        decode_jwt(token, &Keys::from_ref(state)).map_err(|e| {
            info!(error = %e, "token rejected");
            AuthError::InvalidCredential
        })
    }
}
