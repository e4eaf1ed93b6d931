use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::data::query::{self, PageRequest, Predicate, TermMatch};
use crate::data::store::{MemoryStore, read, write};
use crate::data::user_repository::{UserFilter, UserPage, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::{NewUser, User, UserPatch, UserStatus};

impl TermMatch for User {
    fn term_fields(&self) -> [Option<&str>; 2] {
        [Some(&self.name), Some(&self.email)]
    }
}

#[derive(Debug, Clone)]
pub(crate) struct MemoryUserRepository {
    store: Arc<MemoryStore>,
}

impl MemoryUserRepository {
    pub(crate) fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

fn user_predicates(filter: &UserFilter) -> Vec<Predicate<'_, User>> {
    let mut predicates: Vec<Predicate<'_, User>> = Vec::new();
    if let Some(role) = query::active_filter(&filter.role) {
        predicates.push(Box::new(move |user: &User| {
            user.roles.iter().any(|candidate| candidate.as_str() == role)
        }));
    }
    if let Some(status) = query::active_filter(&filter.status) {
        predicates.push(Box::new(move |user: &User| user.status.as_str() == status));
    }
    predicates
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
        let now = Utc::now();
        let mut users = write(&self.store.users)?;
        Ok(users.insert_with(|id| User {
            id,
            email: input.email,
            name: input.name,
            roles: input.roles,
            lang: input.lang,
            country: input.country,
            status: UserStatus::Active,
            email_verified: false,
            profile_picture_url: None,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }))
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>, DomainError> {
        Ok(read(&self.store.users)?.find(id))
    }

    async fn update_user(&self, id: i64, patch: UserPatch) -> Result<Option<User>, DomainError> {
        let now = Utc::now();
        let mut users = write(&self.store.users)?;
        Ok(users.update(id, |user| {
            if let Some(email) = patch.email {
                user.email = email;
            }
            if let Some(name) = patch.name {
                user.name = name;
            }
            if let Some(roles) = patch.roles {
                user.roles = roles;
            }
            if let Some(lang) = patch.lang {
                user.lang = lang;
            }
            if let Some(country) = patch.country {
                user.country = Some(country);
            }
            if let Some(status) = patch.status {
                user.status = status;
            }
            if let Some(email_verified) = patch.email_verified {
                user.email_verified = email_verified;
            }
            if let Some(profile_picture_url) = patch.profile_picture_url {
                user.profile_picture_url = Some(profile_picture_url);
            }
            user.updated_at = now;
        }))
    }

    async fn delete_user(&self, id: i64) -> Result<bool, DomainError> {
        Ok(write(&self.store.users)?.remove(id))
    }

    async fn list_users(
        &self,
        filter: UserFilter,
        page: PageRequest,
    ) -> Result<UserPage, DomainError> {
        let users = read(&self.store.users)?;
        let filtered = query::filter_items(
            users.items(),
            filter.term.as_deref(),
            &user_predicates(&filter),
        );
        let (data, pagination) = query::paginate(&filtered, page);
        Ok(UserPage { data, pagination })
    }

    async fn set_user_status(
        &self,
        id: i64,
        status: UserStatus,
    ) -> Result<Option<User>, DomainError> {
        let now = Utc::now();
        let mut users = write(&self.store.users)?;
        Ok(users.update(id, |user| {
            user.status = status;
            user.updated_at = now;
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::MemoryUserRepository;
    use crate::data::query::PageRequest;
    use crate::data::store::MemoryStore;
    use crate::data::user_repository::{UserFilter, UserRepository};
    use crate::domain::user::{NewUser, UserRole, UserStatus};

    fn repo_with_member() -> MemoryUserRepository {
        let store = Arc::new(MemoryStore::new());
        store.seed("admin@example.org").expect("seed should succeed");
        MemoryUserRepository::new(store)
    }

    #[tokio::test]
    async fn suspend_then_unsuspend_round_trips_the_status() {
        let repo = repo_with_member();
        let member = repo
            .create_user(
                NewUser {
                    email: "fatou@example.org".to_string(),
                    name: "Fatou Ndiaye".to_string(),
                    roles: vec![UserRole::User],
                    lang: "fr".to_string(),
                    country: Some("SN".to_string()),
                }
                .validate()
                .expect("input should be valid"),
            )
            .await
            .expect("create should succeed");
        assert_eq!(member.status, UserStatus::Active);

        let suspended = repo
            .set_user_status(member.id, UserStatus::Suspended)
            .await
            .expect("transition should succeed")
            .expect("user should exist");
        assert_eq!(suspended.status, UserStatus::Suspended);

        let page = repo
            .list_users(
                UserFilter {
                    status: Some("SUSPENDED".to_string()),
                    ..UserFilter::default()
                },
                PageRequest::parse(None, None),
            )
            .await
            .expect("list should succeed");
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].id, member.id);
    }

    #[tokio::test]
    async fn role_filter_matches_any_assigned_role() {
        let repo = repo_with_member();

        let page = repo
            .list_users(
                UserFilter {
                    role: Some("ADMIN".to_string()),
                    ..UserFilter::default()
                },
                PageRequest::parse(None, None),
            )
            .await
            .expect("list should succeed");
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].email, "admin@example.org");
    }
}
