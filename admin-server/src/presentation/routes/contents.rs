use axum::Router;
use axum::middleware;
use axum::routing::{get, post};

use crate::presentation::AppState;
use crate::presentation::handlers::contents::{
    approve_content, create_content, delete_content, get_content, list_contents, publish_content,
    reject_content, unpublish_content, update_content,
};
use crate::presentation::middleware::auth::session_auth_middleware;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_contents).post(create_content))
        .route(
            "/{id}",
            get(get_content).put(update_content).delete(delete_content),
        )
        .route("/{id}/publish", post(publish_content))
        .route("/{id}/unpublish", post(unpublish_content))
        .route("/{id}/approve", post(approve_content))
        .route("/{id}/reject", post(reject_content))
        .layer(middleware::from_fn_with_state(
            state,
            session_auth_middleware,
        ))
}
