use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::content::validate_optional_ref;
use super::error::DomainError;
use super::user::normalize_name;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) enum TeacherStatus {
    Pending,
    Verified,
    Suspended,
    Rejected,
    Inactive,
}

impl TeacherStatus {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Verified => "VERIFIED",
            Self::Suspended => "SUSPENDED",
            Self::Rejected => "REJECTED",
            Self::Inactive => "INACTIVE",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Teacher {
    pub(crate) id: i64,
    pub(crate) display_name: String,
    pub(crate) bio: Option<String>,
    pub(crate) languages: Vec<String>,
    pub(crate) specializations: Vec<String>,
    pub(crate) links: Vec<String>,
    pub(crate) verified: bool,
    pub(crate) status: TeacherStatus,
    pub(crate) verification_notes: Option<String>,
    pub(crate) nationality: Option<String>,
    pub(crate) profile_image_url: Option<String>,
    pub(crate) user_id: Option<i64>,
    pub(crate) followers_count: i64,
    pub(crate) total_content_count: i64,
    pub(crate) total_views: i64,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub(crate) struct NewTeacher {
    pub(crate) display_name: String,
    pub(crate) bio: Option<String>,
    pub(crate) languages: Vec<String>,
    pub(crate) specializations: Vec<String>,
    pub(crate) links: Vec<String>,
    pub(crate) nationality: Option<String>,
    pub(crate) profile_image_url: Option<String>,
    pub(crate) user_id: Option<i64>,
}

impl NewTeacher {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let display_name = normalize_display_name(&self.display_name)?;
        let user_id = validate_optional_ref("userId", self.user_id)?;

        Ok(Self {
            display_name,
            bio: self.bio,
            languages: normalize_str_list(self.languages),
            specializations: normalize_str_list(self.specializations),
            links: self.links,
            nationality: self.nationality,
            profile_image_url: self.profile_image_url,
            user_id,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct TeacherPatch {
    pub(crate) display_name: Option<String>,
    pub(crate) bio: Option<String>,
    pub(crate) languages: Option<Vec<String>>,
    pub(crate) specializations: Option<Vec<String>>,
    pub(crate) links: Option<Vec<String>>,
    pub(crate) verified: Option<bool>,
    pub(crate) status: Option<TeacherStatus>,
    pub(crate) nationality: Option<String>,
    pub(crate) profile_image_url: Option<String>,
}

impl TeacherPatch {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let display_name = match self.display_name {
            Some(name) => Some(normalize_display_name(&name)?),
            None => None,
        };

        Ok(Self {
            display_name,
            bio: self.bio,
            languages: self.languages.map(normalize_str_list),
            specializations: self.specializations.map(normalize_str_list),
            links: self.links,
            verified: self.verified,
            status: self.status,
            nationality: self.nationality,
            profile_image_url: self.profile_image_url,
        })
    }
}

fn normalize_display_name(name: &str) -> Result<String, DomainError> {
    normalize_name(name).map_err(|_| DomainError::Validation {
        field: "displayName",
        message: "must be 1..120 chars",
    })
}

/// Drops empty entries, trims the rest. Language and specialization lists
/// arrive straight from console forms.
fn normalize_str_list(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{NewTeacher, TeacherPatch};

    #[test]
    fn new_teacher_drops_blank_list_entries() {
        let input = NewTeacher {
            display_name: "  Imam Mansour Diop  ".to_string(),
            bio: None,
            languages: vec!["fr".to_string(), "  ".to_string(), " wo ".to_string()],
            specializations: Vec::new(),
            links: Vec::new(),
            nationality: None,
            profile_image_url: None,
            user_id: None,
        };

        let validated = input.validate().expect("teacher must validate");
        assert_eq!(validated.display_name, "Imam Mansour Diop");
        assert_eq!(validated.languages, vec!["fr", "wo"]);
    }

    #[test]
    fn teacher_patch_rejects_blank_display_name() {
        let patch = TeacherPatch {
            display_name: Some("   ".to_string()),
            ..TeacherPatch::default()
        };

        assert!(patch.validate().is_err());
    }
}
