use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) enum ContentType {
    Audio,
    Video,
    Text,
    Pdf,
    Ebook,
}

impl ContentType {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Audio => "AUDIO",
            Self::Video => "VIDEO",
            Self::Text => "TEXT",
            Self::Pdf => "PDF",
            Self::Ebook => "EBOOK",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) enum ContentStatus {
    Draft,
    PendingReview,
    Approved,
    Published,
    Rejected,
    Archived,
    Flagged,
    Private,
}

impl ContentStatus {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::PendingReview => "PENDING_REVIEW",
            Self::Approved => "APPROVED",
            Self::Published => "PUBLISHED",
            Self::Rejected => "REJECTED",
            Self::Archived => "ARCHIVED",
            Self::Flagged => "FLAGGED",
            Self::Private => "PRIVATE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) enum AssetKind {
    AudioHigh,
    AudioLow,
    VideoHigh,
    VideoLow,
    Pdf,
    Thumbnail,
    Transcript,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ContentAsset {
    pub(crate) kind: AssetKind,
    pub(crate) url: String,
    pub(crate) is_default: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Content {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    #[serde(rename = "type")]
    pub(crate) content_type: ContentType,
    pub(crate) lang: String,
    pub(crate) status: ContentStatus,
    pub(crate) teacher_id: Option<i64>,
    pub(crate) views_count: i64,
    pub(crate) downloads_count: i64,
    pub(crate) likes_count: i64,
    pub(crate) favorites_count: i64,
    pub(crate) reports_count: i64,
    pub(crate) download_enabled: bool,
    pub(crate) assets: Vec<ContentAsset>,
    pub(crate) published_at: Option<DateTime<Utc>>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub(crate) struct NewContent {
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) content_type: ContentType,
    pub(crate) lang: String,
    pub(crate) status: ContentStatus,
    pub(crate) teacher_id: Option<i64>,
    pub(crate) download_enabled: bool,
    pub(crate) assets: Vec<ContentAsset>,
}

impl NewContent {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let title = normalize_title(&self.title)?;
        let description = normalize_description(self.description)?;
        let lang = super::user::normalize_lang(&self.lang)?;
        let teacher_id = validate_optional_ref("teacherId", self.teacher_id)?;

        Ok(Self {
            title,
            description,
            content_type: self.content_type,
            lang,
            status: self.status,
            teacher_id,
            download_enabled: self.download_enabled,
            assets: self.assets,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ContentPatch {
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) content_type: Option<ContentType>,
    pub(crate) lang: Option<String>,
    pub(crate) status: Option<ContentStatus>,
    pub(crate) teacher_id: Option<i64>,
    pub(crate) download_enabled: Option<bool>,
    pub(crate) assets: Option<Vec<ContentAsset>>,
}

impl ContentPatch {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let title = match self.title {
            Some(title) => Some(normalize_title(&title)?),
            None => None,
        };
        let description = normalize_description(self.description)?;
        let lang = match self.lang {
            Some(lang) => Some(super::user::normalize_lang(&lang)?),
            None => None,
        };
        let teacher_id = validate_optional_ref("teacherId", self.teacher_id)?;

        Ok(Self {
            title,
            description,
            content_type: self.content_type,
            lang,
            status: self.status,
            teacher_id,
            download_enabled: self.download_enabled,
            assets: self.assets,
        })
    }
}

fn normalize_title(title: &str) -> Result<String, DomainError> {
    let title = title.trim();
    if title.is_empty() || title.len() > 255 {
        return Err(DomainError::Validation {
            field: "title",
            message: "must be 1..255 chars",
        });
    }
    Ok(title.to_string())
}

fn normalize_description(description: Option<String>) -> Result<Option<String>, DomainError> {
    let Some(description) = description else {
        return Ok(None);
    };
    let description = description.trim();
    if description.len() > 4000 {
        return Err(DomainError::Validation {
            field: "description",
            message: "must be at most 4000 chars",
        });
    }
    if description.is_empty() {
        return Ok(None);
    }
    Ok(Some(description.to_string()))
}

pub(crate) fn validate_optional_ref(
    field: &'static str,
    id: Option<i64>,
) -> Result<Option<i64>, DomainError> {
    match id {
        Some(id) if id <= 0 => Err(DomainError::Validation {
            field,
            message: "must be > 0",
        }),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::{ContentPatch, ContentStatus, ContentType, DomainError, NewContent};

    fn sample_input() -> NewContent {
        NewContent {
            title: "Introduction au Tafsir".to_string(),
            description: Some("Cours audio sur les bases du tafsir".to_string()),
            content_type: ContentType::Audio,
            lang: "fr".to_string(),
            status: ContentStatus::Draft,
            teacher_id: Some(1),
            download_enabled: true,
            assets: Vec::new(),
        }
    }

    #[test]
    fn new_content_trims_title_and_description() {
        let input = NewContent {
            title: "  Guide du Ramadan  ".to_string(),
            description: Some("   ".to_string()),
            ..sample_input()
        };

        let validated = input.validate().expect("content must validate");
        assert_eq!(validated.title, "Guide du Ramadan");
        assert!(validated.description.is_none());
    }

    #[test]
    fn new_content_rejects_empty_title() {
        let input = NewContent {
            title: "   ".to_string(),
            ..sample_input()
        };

        let err = input.validate().expect_err("title must be rejected");
        assert!(matches!(err, DomainError::Validation { field: "title", .. }));
    }

    #[test]
    fn new_content_rejects_non_positive_teacher_ref() {
        let input = NewContent {
            teacher_id: Some(0),
            ..sample_input()
        };

        let err = input.validate().expect_err("teacherId must be rejected");
        assert!(matches!(
            err,
            DomainError::Validation {
                field: "teacherId",
                ..
            }
        ));
    }

    #[test]
    fn content_patch_validates_only_present_fields() {
        let patch = ContentPatch {
            title: Some("  Fiqh de la prière  ".to_string()),
            status: Some(ContentStatus::Published),
            ..ContentPatch::default()
        };

        let validated = patch.validate().expect("patch must validate");
        assert_eq!(validated.title.as_deref(), Some("Fiqh de la prière"));
        assert!(validated.lang.is_none());
        assert_eq!(validated.status, Some(ContentStatus::Published));
    }
}
