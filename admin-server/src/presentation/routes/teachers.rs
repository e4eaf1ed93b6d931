use axum::Router;
use axum::middleware;
use axum::routing::{get, post};

use crate::presentation::AppState;
use crate::presentation::handlers::teachers::{
    create_teacher, delete_teacher, get_teacher, list_teachers, reject_teacher, update_teacher,
    verify_teacher,
};
use crate::presentation::middleware::auth::session_auth_middleware;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_teachers).post(create_teacher))
        .route(
            "/{id}",
            get(get_teacher).put(update_teacher).delete(delete_teacher),
        )
        .route("/{id}/verify", post(verify_teacher))
        .route("/{id}/reject", post(reject_teacher))
        .layer(middleware::from_fn_with_state(
            state,
            session_auth_middleware,
        ))
}
