use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::DomainError;
use super::user::normalize_name;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) enum MosqueStatus {
    Active,
    Inactive,
    Suspended,
    Pending,
}

impl MosqueStatus {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Suspended => "SUSPENDED",
            Self::Pending => "PENDING",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Mosque {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) address: Option<String>,
    pub(crate) city: String,
    pub(crate) region: Option<String>,
    pub(crate) country: String,
    pub(crate) latitude: Option<f64>,
    pub(crate) longitude: Option<f64>,
    pub(crate) phone_number: Option<String>,
    pub(crate) email: Option<String>,
    pub(crate) website_url: Option<String>,
    pub(crate) image_url: Option<String>,
    pub(crate) imam_name: Option<String>,
    pub(crate) capacity: Option<i64>,
    pub(crate) verified: bool,
    pub(crate) status: MosqueStatus,
    pub(crate) languages: Vec<String>,
    pub(crate) followers_count: i64,
    pub(crate) content_count: i64,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub(crate) struct NewMosque {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) address: Option<String>,
    pub(crate) city: String,
    pub(crate) region: Option<String>,
    pub(crate) country: String,
    pub(crate) latitude: Option<f64>,
    pub(crate) longitude: Option<f64>,
    pub(crate) phone_number: Option<String>,
    pub(crate) email: Option<String>,
    pub(crate) website_url: Option<String>,
    pub(crate) image_url: Option<String>,
    pub(crate) imam_name: Option<String>,
    pub(crate) capacity: Option<i64>,
    pub(crate) languages: Vec<String>,
}

impl NewMosque {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let name = normalize_name(&self.name)?;
        let capacity = validate_capacity(self.capacity)?;

        Ok(Self {
            name,
            description: self.description,
            address: self.address,
            city: self.city.trim().to_string(),
            region: self.region,
            country: self.country.trim().to_string(),
            latitude: self.latitude,
            longitude: self.longitude,
            phone_number: self.phone_number,
            email: self.email,
            website_url: self.website_url,
            image_url: self.image_url,
            imam_name: self.imam_name,
            capacity,
            languages: self.languages,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct MosquePatch {
    pub(crate) name: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) address: Option<String>,
    pub(crate) city: Option<String>,
    pub(crate) region: Option<String>,
    pub(crate) country: Option<String>,
    pub(crate) latitude: Option<f64>,
    pub(crate) longitude: Option<f64>,
    pub(crate) phone_number: Option<String>,
    pub(crate) email: Option<String>,
    pub(crate) website_url: Option<String>,
    pub(crate) image_url: Option<String>,
    pub(crate) imam_name: Option<String>,
    pub(crate) capacity: Option<i64>,
    pub(crate) verified: Option<bool>,
    pub(crate) status: Option<MosqueStatus>,
    pub(crate) languages: Option<Vec<String>>,
}

impl MosquePatch {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let name = match self.name {
            Some(name) => Some(normalize_name(&name)?),
            None => None,
        };
        let capacity = validate_capacity(self.capacity)?;

        Ok(Self {
            name,
            description: self.description,
            address: self.address,
            city: self.city,
            region: self.region,
            country: self.country,
            latitude: self.latitude,
            longitude: self.longitude,
            phone_number: self.phone_number,
            email: self.email,
            website_url: self.website_url,
            image_url: self.image_url,
            imam_name: self.imam_name,
            capacity,
            verified: self.verified,
            status: self.status,
            languages: self.languages,
        })
    }
}

fn validate_capacity(capacity: Option<i64>) -> Result<Option<i64>, DomainError> {
    match capacity {
        Some(value) if value < 0 => Err(DomainError::Validation {
            field: "capacity",
            message: "must be >= 0",
        }),
        other => Ok(other),
    }
}
