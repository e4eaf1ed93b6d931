use axum::Router;
use axum::middleware;
use axum::routing::{get, post};

use crate::presentation::AppState;
use crate::presentation::handlers::mosques::{
    create_mosque, delete_mosque, get_mosque, list_mosques, update_mosque, verify_mosque,
};
use crate::presentation::middleware::auth::session_auth_middleware;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_mosques).post(create_mosque))
        .route(
            "/{id}",
            get(get_mosque).put(update_mosque).delete(delete_mosque),
        )
        .route("/{id}/verify", post(verify_mosque))
        .layer(middleware::from_fn_with_state(
            state,
            session_auth_middleware,
        ))
}
