use axum::Router;
use axum::middleware;
use axum::routing::get;

use crate::presentation::AppState;
use crate::presentation::handlers::themes::{
    create_theme, delete_theme, get_theme, list_themes, update_theme,
};
use crate::presentation::middleware::auth::session_auth_middleware;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_themes).post(create_theme))
        .route(
            "/{id}",
            get(get_theme).put(update_theme).delete(delete_theme),
        )
        .layer(middleware::from_fn_with_state(
            state,
            session_auth_middleware,
        ))
}
