use async_trait::async_trait;

use crate::data::query::{PageRequest, Pagination};
use crate::domain::error::DomainError;
use crate::domain::tag::{NewTag, Tag, TagPatch};

#[derive(Debug, Clone, Default)]
pub(crate) struct TagFilter {
    pub(crate) term: Option<String>,
    pub(crate) tag_type: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct TagPage {
    pub(crate) data: Vec<Tag>,
    pub(crate) pagination: Pagination,
}

#[async_trait]
pub(crate) trait TagRepository: Send + Sync {
    async fn create_tag(&self, input: NewTag) -> Result<Tag, DomainError>;
    async fn get_tag(&self, id: i64) -> Result<Option<Tag>, DomainError>;
    async fn update_tag(&self, id: i64, patch: TagPatch) -> Result<Option<Tag>, DomainError>;
    async fn delete_tag(&self, id: i64) -> Result<bool, DomainError>;
    async fn list_tags(&self, filter: TagFilter, page: PageRequest)
    -> Result<TagPage, DomainError>;
}
