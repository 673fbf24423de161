use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use common::{
    models::{ApiResponse, LoginResponse},
    requests::LoginRequest,
};
use tracing::debug;

use super::auth_errors::AuthError;
use crate::server::AppState;

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<LoginResponse>>, AuthError> {
    let Json(request) = payload.map_err(|e| {
        debug!(error = %e, "rejected login body");
        AuthError::MalformedRequest
    })?;
    let token = state
        .auth
        .login(request.address.trim(), request.signed_nonce.trim())
        .await?;
    Ok(Json(ApiResponse::ok(LoginResponse { token })))
}
