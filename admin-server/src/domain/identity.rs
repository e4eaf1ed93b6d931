use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::DomainError;
use super::user::{User, UserRole, UserStatus, normalize_email, normalize_name};

/// Identity snapshot embedded in session tokens and returned by `/api/me`.
///
/// With signed tokens this is frozen at issuance: a role or status change
/// does not show up until a new token is issued. Resolvers return it
/// verbatim and never re-read the user collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SessionUser {
    pub(crate) id: i64,
    pub(crate) email: String,
    pub(crate) name: String,
    pub(crate) roles: Vec<UserRole>,
    pub(crate) lang: String,
    pub(crate) status: UserStatus,
}

impl SessionUser {
    pub(crate) fn new(
        id: i64,
        email: impl Into<String>,
        name: impl Into<String>,
        roles: Vec<UserRole>,
        lang: impl Into<String>,
        status: UserStatus,
    ) -> Result<Self, DomainError> {
        if id <= 0 {
            return Err(DomainError::Validation {
                field: "id",
                message: "must be > 0",
            });
        }
        if roles.is_empty() {
            return Err(DomainError::Validation {
                field: "roles",
                message: "must not be empty",
            });
        }
        let email = normalize_email(&email.into())?;
        let name = normalize_name(&name.into())?;

        Ok(Self {
            id,
            email,
            name,
            roles,
            lang: lang.into(),
            status,
        })
    }
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            roles: user.roles.clone(),
            lang: user.lang.clone(),
            status: user.status,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct LoginRequest {
    pub(crate) email: String,
    pub(crate) password: String,
    pub(crate) remember_me: bool,
}

impl LoginRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let email = normalize_email(&self.email)?;
        if self.password.is_empty() {
            return Err(DomainError::Validation {
                field: "password",
                message: "must not be empty",
            });
        }
        Ok(Self {
            email,
            password: self.password,
            remember_me: self.remember_me,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{SessionUser, UserRole, UserStatus};
    use crate::domain::error::DomainError;

    #[test]
    fn session_user_normalizes_email() {
        let user = SessionUser::new(
            1,
            " Admin@Example.com ",
            "Admin",
            vec![UserRole::Admin],
            "fr",
            UserStatus::Active,
        )
        .expect("snapshot must be valid");

        assert_eq!(user.email, "admin@example.com");
    }

    #[test]
    fn session_user_rejects_empty_roles() {
        let err = SessionUser::new(
            1,
            "admin@example.com",
            "Admin",
            Vec::new(),
            "fr",
            UserStatus::Active,
        )
        .expect_err("roles must be rejected");

        assert!(matches!(err, DomainError::Validation { field: "roles", .. }));
    }

    #[test]
    fn session_user_rejects_non_positive_id() {
        let err = SessionUser::new(
            0,
            "admin@example.com",
            "Admin",
            vec![UserRole::Admin],
            "fr",
            UserStatus::Active,
        )
        .expect_err("id must be rejected");

        assert!(matches!(err, DomainError::Validation { field: "id", .. }));
    }
}
