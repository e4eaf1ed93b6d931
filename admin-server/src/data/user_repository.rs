use async_trait::async_trait;

use crate::data::query::{PageRequest, Pagination};
use crate::domain::error::DomainError;
use crate::domain::user::{NewUser, User, UserPatch, UserStatus};

#[derive(Debug, Clone, Default)]
pub(crate) struct UserFilter {
    pub(crate) term: Option<String>,
    pub(crate) role: Option<String>,
    pub(crate) status: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct UserPage {
    pub(crate) data: Vec<User>,
    pub(crate) pagination: Pagination,
}

#[async_trait]
pub(crate) trait UserRepository: Send + Sync {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError>;
    async fn get_user(&self, id: i64) -> Result<Option<User>, DomainError>;
    async fn update_user(&self, id: i64, patch: UserPatch) -> Result<Option<User>, DomainError>;
    async fn delete_user(&self, id: i64) -> Result<bool, DomainError>;
    async fn list_users(
        &self,
        filter: UserFilter,
        page: PageRequest,
    ) -> Result<UserPage, DomainError>;
    async fn set_user_status(&self, id: i64, status: UserStatus)
    -> Result<Option<User>, DomainError>;
}
