use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::models::ApiResponse;
use thiserror::Error;

use crate::store::StoreError;

/// Body of every rejection from the protected-route gate.
pub const FORBIDDEN_MESSAGE: &str = "Forbidden";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("bad request")]
    MalformedRequest,
    #[error("invalid nonce")]
    InvalidNonce,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("not enough stake")]
    InsufficientStake,
    #[error("error signing token")]
    Issuance(#[source] jsonwebtoken::errors::Error),
    #[error("error generating nonce")]
    NonceGeneration(#[source] rand::Error),
    #[error("nonce store unavailable")]
    StoreUnavailable(#[source] StoreError),
    #[error("invalid credential")]
    InvalidCredential,
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MalformedRequest
            | AuthError::InvalidNonce
            | AuthError::InvalidSignature
            | AuthError::InsufficientStake => StatusCode::BAD_REQUEST,
            AuthError::Issuance(_) | AuthError::NonceGeneration(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AuthError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AuthError::InvalidCredential => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            // Same terse body whatever check failed.
            AuthError::InvalidCredential => (status, FORBIDDEN_MESSAGE).into_response(),
            other => (status, Json(ApiResponse::error(other.to_string()))).into_response(),
        }
    }
}
