use axum::Router;
use axum::middleware;
use axum::routing::{get, post};

use crate::presentation::AppState;
use crate::presentation::handlers::proxy::proxy_media;
use crate::presentation::handlers::uploads::{serve_upload, upload_file};
use crate::presentation::middleware::auth::session_auth_middleware;

/// Serving an uploaded file and proxying media stay public so players can
/// stream without a session; storing a new file requires one.
pub(crate) fn router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/api/upload/{id}", get(serve_upload))
        .route("/api/proxy", get(proxy_media));

    let protected = Router::new()
        .route("/api/upload", post(upload_file))
        .layer(middleware::from_fn_with_state(
            state,
            session_auth_middleware,
        ));

    public.merge(protected)
}
