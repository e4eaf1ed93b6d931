use async_trait::async_trait;

use crate::data::query::{PageRequest, Pagination};
use crate::domain::error::DomainError;
use crate::domain::teacher::{NewTeacher, Teacher, TeacherPatch, TeacherStatus};

#[derive(Debug, Clone, Default)]
pub(crate) struct TeacherFilter {
    pub(crate) term: Option<String>,
    pub(crate) verified: Option<String>,
    pub(crate) lang: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct TeacherPage {
    pub(crate) data: Vec<Teacher>,
    pub(crate) pagination: Pagination,
}

#[async_trait]
pub(crate) trait TeacherRepository: Send + Sync {
    async fn create_teacher(&self, input: NewTeacher) -> Result<Teacher, DomainError>;
    async fn get_teacher(&self, id: i64) -> Result<Option<Teacher>, DomainError>;
    async fn update_teacher(
        &self,
        id: i64,
        patch: TeacherPatch,
    ) -> Result<Option<Teacher>, DomainError>;
    async fn delete_teacher(&self, id: i64) -> Result<bool, DomainError>;
    async fn list_teachers(
        &self,
        filter: TeacherFilter,
        page: PageRequest,
    ) -> Result<TeacherPage, DomainError>;
    async fn set_verification(
        &self,
        id: i64,
        verified: bool,
        status: TeacherStatus,
        notes: Option<String>,
    ) -> Result<Option<Teacher>, DomainError>;
}
