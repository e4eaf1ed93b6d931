pub(crate) mod content_repository;
pub(crate) mod mosque_repository;
pub(crate) mod query;
pub(crate) mod repositories;
pub(crate) mod store;
pub(crate) mod tag_repository;
pub(crate) mod teacher_repository;
pub(crate) mod theme_repository;
pub(crate) mod uploads;
pub(crate) mod user_repository;
