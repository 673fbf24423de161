use crate::{auth::auth_errors::AuthError, server::AppState};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use bytes::{Bytes, BytesMut};
use common::{
    models::{ApiResponse, NonceResponse},
    requests::NonceRequest,
};
use rand::{rngs::OsRng, RngCore};
use std::{io, ops::Deref, str::FromStr};
use tracing::debug;

pub const NONCE_SIZE: usize = 32;

/// A random challenge, hex encoded on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nonce(Bytes);

impl Nonce {
    /// Draws [`NONCE_SIZE`] bytes from the operating system's CSPRNG.
    pub fn generate() -> Result<Self, rand::Error> {
        Self::generate_with(&mut OsRng)
    }

    pub fn generate_with<R: RngCore>(rng: &mut R) -> Result<Self, rand::Error> {
        let mut bytes = BytesMut::zeroed(NONCE_SIZE);
        rng.try_fill_bytes(bytes.as_mut())?;
        Ok(Self(bytes.freeze()))
    }
}

/// True iff `s` is exactly [`NONCE_SIZE`] bytes of hex.
pub fn is_well_formed(s: &str) -> bool {
    s.len() == NONCE_SIZE * 2 && hex::decode(s).is_ok()
}

impl FromStr for Nonce {
    type Err = io::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_well_formed(s) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("expected {} hex characters", NONCE_SIZE * 2),
            ));
        }
        let bytes =
            hex::decode(s).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(Self(bytes.into()))
    }
}

impl std::fmt::Display for Nonce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

impl Deref for Nonce {
    type Target = Bytes;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

pub async fn generate_nonce(
    State(state): State<AppState>,
    payload: Result<Json<NonceRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<NonceResponse>>, AuthError> {
    let Json(request) = payload.map_err(|e| {
        debug!(error = %e, "rejected nonce request body");
        AuthError::MalformedRequest
    })?;
    let nonce = state.auth.request_nonce(request.address.trim()).await?;
    Ok(Json(ApiResponse::ok(NonceResponse {
        nonce: nonce.to_string(),
    })))
}
