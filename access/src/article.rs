use axum::Json;
use common::models::ApiResponse;
use tracing::info;

use crate::auth::Claims;

pub const ARTICLE: &str = "Hello world";

/// Protected resource. Only reachable with a valid token.
pub async fn article(claims: Claims) -> Json<ApiResponse<String>> {
    info!(address = %claims.address, "serving article");
    Json(ApiResponse::ok(ARTICLE.to_string()))
}
