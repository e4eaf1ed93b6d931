use axum::Router;
use axum::middleware;
use axum::routing::get;

use crate::presentation::AppState;
use crate::presentation::handlers::dashboard::dashboard_stats;
use crate::presentation::middleware::auth::session_auth_middleware;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/stats", get(dashboard_stats))
        .layer(middleware::from_fn_with_state(
            state,
            session_auth_middleware,
        ))
}
