use crate::article::article;
use crate::auth::{auth, AuthService, Keys};
use crate::config::AuthConfig;
use crate::ledger::{Ledger, RpcLedger};
use crate::store::{MemoryNonceStore, NonceStore};
use crate::utils::shutdown::shutdown_signal;
use crate::{errors::ServerError, Args};
use axum::{
    extract::{DefaultBodyLimit, FromRef},
    routing::get,
    serve, Router,
};
use core::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Largest accepted request body, in bytes.
pub const BODY_LIMIT: usize = 4096;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub keys: Keys,
}

impl AppState {
    pub fn new(store: Arc<dyn NonceStore>, ledger: Arc<dyn Ledger>, config: &AuthConfig) -> Self {
        Self {
            auth: Arc::new(AuthService::new(store, ledger, config)),
            keys: Keys::new(config.jwt_secret_key.as_bytes()),
        }
    }
}

impl FromRef<AppState> for Keys {
    fn from_ref(state: &AppState) -> Self {
        state.keys.clone()
    }
}

pub fn app(app_state: AppState) -> Router {
    Router::new()
        .route("/article", get(article))
        .with_state(app_state.clone())
        .nest("/auth", auth(app_state))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(TraceLayer::new_for_http())
}

pub async fn start(args: Args) -> Result<(), ServerError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AuthConfig::try_from(&args)?;
    info!(?config, "loaded configuration");

    let ledger = RpcLedger::new(config.stake.rpc_url.clone(), config.stake.ledger_timeout)?;
    let store = MemoryNonceStore::new();
    let app_state = AppState::new(Arc::new(store), Arc::new(ledger), &config);

    let address: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(ServerError::AddressParse)?;

    let listener = TcpListener::bind(address).await?;

    info!("Listening on {}", address);

    serve(listener, app(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
