use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::DomainError;
use super::theme::slugify;
use super::user::normalize_name;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) enum TagType {
    General,
    Topic,
    Person,
    Place,
    Event,
    Language,
    Audience,
    Format,
    Occasion,
    Madhab,
    Difficulty,
}

impl TagType {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::General => "GENERAL",
            Self::Topic => "TOPIC",
            Self::Person => "PERSON",
            Self::Place => "PLACE",
            Self::Event => "EVENT",
            Self::Language => "LANGUAGE",
            Self::Audience => "AUDIENCE",
            Self::Format => "FORMAT",
            Self::Occasion => "OCCASION",
            Self::Madhab => "MADHAB",
            Self::Difficulty => "DIFFICULTY",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Tag {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) slug: String,
    pub(crate) description: Option<String>,
    #[serde(rename = "type")]
    pub(crate) tag_type: TagType,
    pub(crate) color_code: Option<String>,
    pub(crate) is_featured: bool,
    pub(crate) is_active: bool,
    pub(crate) usage_count: i64,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub(crate) struct NewTag {
    pub(crate) name: String,
    pub(crate) slug: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) tag_type: TagType,
    pub(crate) color_code: Option<String>,
    pub(crate) is_featured: bool,
    pub(crate) is_active: bool,
}

impl NewTag {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let name = normalize_name(&self.name)?;
        let slug = match self.slug {
            Some(slug) => slugify(&slug),
            None => slugify(&name),
        };
        if slug.is_empty() {
            return Err(DomainError::Validation {
                field: "slug",
                message: "must contain at least one alphanumeric char",
            });
        }

        Ok(Self {
            name,
            slug: Some(slug),
            description: self.description,
            tag_type: self.tag_type,
            color_code: self.color_code,
            is_featured: self.is_featured,
            is_active: self.is_active,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct TagPatch {
    pub(crate) name: Option<String>,
    pub(crate) slug: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) tag_type: Option<TagType>,
    pub(crate) color_code: Option<String>,
    pub(crate) is_featured: Option<bool>,
    pub(crate) is_active: Option<bool>,
}

impl TagPatch {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let name = match self.name {
            Some(name) => Some(normalize_name(&name)?),
            None => None,
        };
        let slug = match self.slug {
            Some(slug) => {
                let slug = slugify(&slug);
                if slug.is_empty() {
                    return Err(DomainError::Validation {
                        field: "slug",
                        message: "must contain at least one alphanumeric char",
                    });
                }
                Some(slug)
            }
            None => None,
        };

        Ok(Self {
            name,
            slug,
            description: self.description,
            tag_type: self.tag_type,
            color_code: self.color_code,
            is_featured: self.is_featured,
            is_active: self.is_active,
        })
    }
}
