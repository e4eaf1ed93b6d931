use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::ValidateEmail;

use super::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) enum UserRole {
    User,
    Teacher,
    Moderator,
    Admin,
}

impl UserRole {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Teacher => "TEACHER",
            Self::Moderator => "MODERATOR",
            Self::Admin => "ADMIN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) enum UserStatus {
    Active,
    Suspended,
    Banned,
    PendingVerification,
}

impl UserStatus {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Suspended => "SUSPENDED",
            Self::Banned => "BANNED",
            Self::PendingVerification => "PENDING_VERIFICATION",
        }
    }
}

/// Console account. Not a platform end user: the console manages these rows
/// like any other collection.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct User {
    pub(crate) id: i64,
    pub(crate) email: String,
    pub(crate) name: String,
    pub(crate) roles: Vec<UserRole>,
    pub(crate) lang: String,
    pub(crate) country: Option<String>,
    pub(crate) status: UserStatus,
    pub(crate) email_verified: bool,
    pub(crate) profile_picture_url: Option<String>,
    pub(crate) last_login_at: Option<DateTime<Utc>>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub(crate) struct NewUser {
    pub(crate) email: String,
    pub(crate) name: String,
    pub(crate) roles: Vec<UserRole>,
    pub(crate) lang: String,
    pub(crate) country: Option<String>,
}

impl NewUser {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            email: normalize_email(&self.email)?,
            name: normalize_name(&self.name)?,
            roles: validate_roles(self.roles)?,
            lang: normalize_lang(&self.lang)?,
            country: self.country,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct UserPatch {
    pub(crate) email: Option<String>,
    pub(crate) name: Option<String>,
    pub(crate) roles: Option<Vec<UserRole>>,
    pub(crate) lang: Option<String>,
    pub(crate) country: Option<String>,
    pub(crate) status: Option<UserStatus>,
    pub(crate) email_verified: Option<bool>,
    pub(crate) profile_picture_url: Option<String>,
}

impl UserPatch {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let email = match self.email {
            Some(email) => Some(normalize_email(&email)?),
            None => None,
        };
        let name = match self.name {
            Some(name) => Some(normalize_name(&name)?),
            None => None,
        };
        let roles = match self.roles {
            Some(roles) => Some(validate_roles(roles)?),
            None => None,
        };
        let lang = match self.lang {
            Some(lang) => Some(normalize_lang(&lang)?),
            None => None,
        };

        Ok(Self {
            email,
            name,
            roles,
            lang,
            country: self.country,
            status: self.status,
            email_verified: self.email_verified,
            profile_picture_url: self.profile_picture_url,
        })
    }
}

pub(crate) fn normalize_email(email: &str) -> Result<String, DomainError> {
    let email = email.trim().to_lowercase();
    if !email.validate_email() {
        return Err(DomainError::Validation {
            field: "email",
            message: "must be a valid email",
        });
    }
    Ok(email)
}

pub(crate) fn normalize_name(name: &str) -> Result<String, DomainError> {
    let name = name.trim();
    if name.is_empty() || name.len() > 120 {
        return Err(DomainError::Validation {
            field: "name",
            message: "must be 1..120 chars",
        });
    }
    Ok(name.to_string())
}

pub(crate) fn normalize_lang(lang: &str) -> Result<String, DomainError> {
    let lang = lang.trim().to_lowercase();
    if lang.is_empty() || lang.len() > 8 {
        return Err(DomainError::Validation {
            field: "lang",
            message: "must be 1..8 chars",
        });
    }
    Ok(lang)
}

fn validate_roles(roles: Vec<UserRole>) -> Result<Vec<UserRole>, DomainError> {
    if roles.is_empty() {
        return Err(DomainError::Validation {
            field: "roles",
            message: "must not be empty",
        });
    }
    let mut deduped: Vec<UserRole> = Vec::with_capacity(roles.len());
    for role in roles {
        if !deduped.contains(&role) {
            deduped.push(role);
        }
    }
    Ok(deduped)
}

#[cfg(test)]
mod tests {
    use super::{DomainError, NewUser, UserPatch, UserRole, normalize_email, normalize_lang};

    #[test]
    fn normalize_email_trims_and_lowercases() {
        let value = normalize_email("  Admin@Example.COM ").expect("must be valid");
        assert_eq!(value, "admin@example.com");
    }

    #[test]
    fn normalize_email_rejects_garbage() {
        assert!(normalize_email("not-an-email").is_err());
    }

    #[test]
    fn normalize_lang_lowercases_codes() {
        assert_eq!(normalize_lang(" FR ").expect("must be valid"), "fr");
        assert!(normalize_lang("").is_err());
    }

    #[test]
    fn new_user_rejects_empty_roles() {
        let input = NewUser {
            email: "admin@example.com".to_string(),
            name: "Admin".to_string(),
            roles: Vec::new(),
            lang: "fr".to_string(),
            country: None,
        };

        let err = input.validate().expect_err("roles must be rejected");
        match err {
            DomainError::Validation { field, .. } => assert_eq!(field, "roles"),
            _ => panic!("expected DomainError::Validation"),
        }
    }

    #[test]
    fn user_patch_keeps_absent_fields_untouched() {
        let patch = UserPatch {
            name: Some("  Modo  ".to_string()),
            roles: Some(vec![UserRole::Moderator]),
            ..UserPatch::default()
        };

        let validated = patch.validate().expect("patch must validate");
        assert_eq!(validated.name.as_deref(), Some("Modo"));
        assert!(validated.email.is_none());
        assert!(validated.status.is_none());
    }
}
