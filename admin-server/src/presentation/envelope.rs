use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::data::query::Pagination;

/// Response envelope for single-resource and action endpoints.
/// Listing endpoints skip it and return [`ListResponse`] bodies directly.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ApiResponse<T> {
    pub(crate) data: Option<T>,
    pub(crate) success: bool,
    pub(crate) message: String,
    pub(crate) timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    pub(crate) fn ok(data: T, message: &str) -> Self {
        Self {
            data: Some(data),
            success: true,
            message: message.to_string(),
            timestamp: Utc::now(),
        }
    }
}

impl ApiResponse<()> {
    pub(crate) fn err(message: &str) -> Self {
        Self {
            data: None,
            success: false,
            message: message.to_string(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ListResponse<T> {
    pub(crate) data: Vec<T>,
    pub(crate) pagination: Pagination,
}
