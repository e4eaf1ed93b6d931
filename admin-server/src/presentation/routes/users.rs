use axum::Router;
use axum::middleware;
use axum::routing::{get, post};

use crate::presentation::AppState;
use crate::presentation::handlers::users::{
    create_user, delete_user, get_user, list_users, suspend_user, unsuspend_user, update_user,
};
use crate::presentation::middleware::auth::session_auth_middleware;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
        .route("/{id}/suspend", post(suspend_user))
        .route("/{id}/unsuspend", post(unsuspend_user))
        .layer(middleware::from_fn_with_state(
            state,
            session_auth_middleware,
        ))
}
