pub mod auth_errors;
pub mod jwt;
pub mod nonce;
pub mod service;
pub mod signature;
pub mod validation;

use crate::server::AppState;
use axum::{routing::post, Router};
use nonce::generate_nonce;
use validation::login;

pub use auth_errors::AuthError;
pub use jwt::{Claims, Keys};
pub use service::AuthService;

pub fn auth(app_state: AppState) -> Router {
    Router::new()
        .route("/nonce", post(generate_nonce))
        .route("/login", post(login))
        .with_state(app_state)
}
