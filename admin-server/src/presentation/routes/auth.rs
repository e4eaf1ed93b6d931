use axum::Router;
use axum::middleware;
use axum::routing::{get, post};

use crate::presentation::AppState;
use crate::presentation::handlers::auth::{login, logout, me, refresh};
use crate::presentation::middleware::auth::session_auth_middleware;

/// Public entry points. Logout and refresh stay open: both degrade to a
/// harmless answer when the presented credential is missing or stale.
pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/refresh", post(refresh))
}

/// `/api/me` sits outside the `/api/auth` group and requires a session.
pub(crate) fn session_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/me", get(me))
        .layer(middleware::from_fn_with_state(
            state,
            session_auth_middleware,
        ))
}
