pub(crate) mod content_repository;
pub(crate) mod mosque_repository;
pub(crate) mod tag_repository;
pub(crate) mod teacher_repository;
pub(crate) mod theme_repository;
pub(crate) mod user_repository;
