pub(crate) mod content;
pub(crate) mod error;
pub(crate) mod identity;
pub(crate) mod mosque;
pub(crate) mod tag;
pub(crate) mod teacher;
pub(crate) mod theme;
pub(crate) mod user;
