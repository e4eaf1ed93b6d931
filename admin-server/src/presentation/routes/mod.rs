use axum::Router;

use super::AppState;

pub(crate) mod auth;
pub(crate) mod contents;
pub(crate) mod dashboard;
pub(crate) mod media;
pub(crate) mod mosques;
pub(crate) mod search;
pub(crate) mod tags;
pub(crate) mod teachers;
pub(crate) mod themes;
pub(crate) mod users;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/api/auth", auth::router())
        .nest("/api/admin/contents", contents::router(state.clone()))
        .nest("/api/admin/teachers", teachers::router(state.clone()))
        .nest("/api/admin/mosques", mosques::router(state.clone()))
        .nest("/api/admin/themes", themes::router(state.clone()))
        .nest("/api/admin/tags", tags::router(state.clone()))
        .nest("/api/admin/users", users::router(state.clone()))
        .nest("/api/admin/dashboard", dashboard::router(state.clone()))
        .nest("/api/search", search::router(state.clone()))
        .merge(auth::session_router(state.clone()))
        .merge(media::router(state))
}
