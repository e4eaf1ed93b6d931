pub(crate) mod auth_service;
pub(crate) mod search_service;
