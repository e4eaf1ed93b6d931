use std::sync::Arc;

use anyhow::Result;
use tracing::info;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use application::auth_service::AuthService;
use data::store::MemoryStore;
use domain::identity::SessionUser;
use infrastructure::logging::init_logging;
use infrastructure::settings::Settings;
use infrastructure::token::{OpaqueTokens, SignedTokens, TokenMode, TokenService};
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let store = Arc::new(MemoryStore::new());
    let admin = store.seed(&settings.admin_email)?;
    info!("in-memory store seeded");

    let tokens: Arc<dyn TokenService> = match settings.token_mode {
        TokenMode::Signed => Arc::new(SignedTokens::new(
            &settings.jwt_secret,
            settings.token_ttl_seconds,
            settings.token_ttl_extended_seconds,
        )),
        TokenMode::Opaque => Arc::new(OpaqueTokens::new(
            settings.token_ttl_seconds,
            settings.token_ttl_extended_seconds,
        )),
    };
    info!(mode = ?settings.token_mode, "session tokens configured");

    let auth_service = Arc::new(AuthService::new(
        SessionUser::from(&admin),
        &settings.admin_password,
        tokens.clone(),
    )?);

    let settings = Arc::new(settings);
    let state = AppState::new(settings.clone(), store, tokens, auth_service);

    server::run_http(&settings, state).await
}
