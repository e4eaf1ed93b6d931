use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::DomainError;
use super::user::normalize_name;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Theme {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) slug: String,
    pub(crate) description: Option<String>,
    pub(crate) parent_id: Option<i64>,
    pub(crate) display_order: i64,
    pub(crate) icon_name: Option<String>,
    pub(crate) color_code: Option<String>,
    pub(crate) is_featured: bool,
    pub(crate) is_active: bool,
    pub(crate) content_count: i64,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub(crate) struct NewTheme {
    pub(crate) name: String,
    pub(crate) slug: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) parent_id: Option<i64>,
    pub(crate) display_order: i64,
    pub(crate) icon_name: Option<String>,
    pub(crate) color_code: Option<String>,
    pub(crate) is_featured: bool,
    pub(crate) is_active: bool,
}

impl NewTheme {
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
            parent_id: super::content::validate_optional_ref("parentId", self.parent_id)?,
            display_order: self.display_order,
            icon_name: self.icon_name,
            color_code: self.color_code,
            is_featured: self.is_featured,
            is_active: self.is_active,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ThemePatch {
    pub(crate) name: Option<String>,
    pub(crate) slug: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) parent_id: Option<i64>,
    pub(crate) display_order: Option<i64>,
    pub(crate) icon_name: Option<String>,
    pub(crate) color_code: Option<String>,
    pub(crate) is_featured: Option<bool>,
    pub(crate) is_active: Option<bool>,
}

impl ThemePatch {
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
            parent_id: super::content::validate_optional_ref("parentId", self.parent_id)?,
            display_order: self.display_order,
            icon_name: self.icon_name,
            color_code: self.color_code,
            is_featured: self.is_featured,
            is_active: self.is_active,
        })
    }
}

/// Lowercased, ascii-alphanumeric words joined by single hyphens.
/// "Fiqh de la prière" becomes "fiqh-de-la-pri-re"; accents are not
/// transliterated, only dropped as separators.
pub(crate) fn slugify(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    let mut last_was_hyphen = true;
    for ch in raw.trim().to_lowercase().chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch);
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::{NewTheme, slugify};

    #[test]
    fn slugify_joins_words_with_single_hyphens() {
        assert_eq!(slugify("  Tafsir du Coran  "), "tafsir-du-coran");
        assert_eq!(slugify("Aqida & Sira"), "aqida-sira");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn new_theme_derives_slug_from_name_when_absent() {
        let input = NewTheme {
            name: "Fiqh".to_string(),
            slug: None,
            description: None,
            parent_id: None,
            display_order: 0,
            icon_name: None,
            color_code: None,
            is_featured: false,
            is_active: true,
        };

        let validated = input.validate().expect("theme must validate");
        assert_eq!(validated.slug.as_deref(), Some("fiqh"));
    }
}
