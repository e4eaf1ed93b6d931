pub(crate) mod auth;
pub(crate) mod contents;
pub(crate) mod dashboard;
pub(crate) mod mosques;
pub(crate) mod proxy;
pub(crate) mod search;
pub(crate) mod tags;
pub(crate) mod teachers;
pub(crate) mod themes;
pub(crate) mod uploads;
pub(crate) mod users;
