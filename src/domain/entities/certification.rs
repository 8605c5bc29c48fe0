use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::{
    entities::resource::{non_empty_param, validate_optional_url, Resource},
    schema::{Fallback, Field, Schema},
};

const MIN_NAME_LENGTH: u64 = 3;
const MAX_NAME_LENGTH: u64 = 200;
const MIN_ISSUER_LENGTH: u64 = 2;
const MAX_ISSUER_LENGTH: u64 = 200;

pub static CERTIFICATION_SCHEMA: Schema = Schema::new(&[
    Field::text("name", MIN_NAME_LENGTH as usize, MAX_NAME_LENGTH as usize).required(),
    Field::text("issuer", MIN_ISSUER_LENGTH as usize, MAX_ISSUER_LENGTH as usize).required(),
    Field::date("dateObtained").nullable().allow_empty(),
    Field::free_text("credentialId").nullable().allow_empty(),
    Field::url("credentialUrl"),
    Field::url("link"),
    Field::date("expiryDate").nullable().default_to(Fallback::Null),
]);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub issuer: String,
    pub date_obtained: Option<DateTime<Utc>>,
    pub credential_id: Option<String>,
    pub credential_url: Option<String>,
    pub link: Option<String>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CertificationDraft {
    #[validate(length(min = MIN_NAME_LENGTH, max = MAX_NAME_LENGTH))]
    pub name: String,

    #[validate(length(min = MIN_ISSUER_LENGTH, max = MAX_ISSUER_LENGTH))]
    pub issuer: String,

    pub date_obtained: Option<DateTime<Utc>>,

    pub credential_id: Option<String>,

    #[validate(custom(function = "validate_optional_url"))]
    pub credential_url: Option<String>,

    #[validate(custom(function = "validate_optional_url"))]
    pub link: Option<String>,

    pub expiry_date: Option<DateTime<Utc>>,
}

impl CertificationDraft {
    /// The credential id only participates in uniqueness when it is non-empty.
    pub fn unique_credential_id(&self) -> Option<&str> {
        self.credential_id.as_deref().filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CertificationFilter {
    /// Case-insensitive substring of the issuer.
    pub issuer: Option<String>,
}

impl Resource for Certification {
    type Draft = CertificationDraft;
    type Filter = CertificationFilter;

    const NAME: &'static str = "Certification";
    const COLLECTION: &'static str = "certifications";
    const DEFAULT_SORT: &'static str = "-dateObtained";
    const SORT_FIELDS: &'static [(&'static str, &'static str)] = &[
        ("name", "name"),
        ("issuer", "issuer"),
        ("dateObtained", "date_obtained"),
        ("expiryDate", "expiry_date"),
        ("createdAt", "created_at"),
        ("updatedAt", "updated_at"),
    ];

    fn schema() -> &'static Schema {
        &CERTIFICATION_SCHEMA
    }

    fn filter_from_params(params: &HashMap<String, String>) -> CertificationFilter {
        CertificationFilter {
            issuer: non_empty_param(params, "issuer"),
        }
    }

    fn from_draft(id: Uuid, draft: CertificationDraft, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        Certification {
            id,
            name: draft.name,
            issuer: draft.issuer,
            date_obtained: draft.date_obtained,
            credential_id: draft.credential_id,
            credential_url: draft.credential_url,
            link: draft.link,
            expiry_date: draft.expiry_date,
            created_at,
            updated_at,
        }
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
