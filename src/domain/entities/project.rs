use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::{
    entities::resource::{validate_optional_url, Resource},
    schema::{Fallback, Field, Schema},
};

// ───── Constants ──────────────────────────────────────────────────────
const MIN_TITLE_LENGTH: u64 = 3;
const MAX_TITLE_LENGTH: u64 = 200;
const MIN_DESCRIPTION_LENGTH: u64 = 10;
const MAX_DESCRIPTION_LENGTH: u64 = 2000;

pub static PROJECT_SCHEMA: Schema = Schema::new(&[
    Field::text("title", MIN_TITLE_LENGTH as usize, MAX_TITLE_LENGTH as usize).required(),
    Field::text("description", MIN_DESCRIPTION_LENGTH as usize, MAX_DESCRIPTION_LENGTH as usize).required(),
    Field::text_list("technologies").default_to(Fallback::EmptyList),
    Field::url("link"),
    Field::url("imageUrl"),
    Field::date("startDate").nullable(),
    Field::date("endDate").nullable(),
    Field::boolean("featured").default_to(Fallback::Bool(false)),
]);

// ───── Stored Document ───────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub link: Option<String>,
    pub image_url: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ───── Write Document ────────────────────────────────────────────────
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    #[validate(length(min = MIN_TITLE_LENGTH, max = MAX_TITLE_LENGTH))]
    pub title: String,

    #[validate(length(min = MIN_DESCRIPTION_LENGTH, max = MAX_DESCRIPTION_LENGTH))]
    pub description: String,

    #[serde(default)]
    pub technologies: Vec<String>,

    #[validate(custom(function = "validate_optional_url"))]
    pub link: Option<String>,

    #[validate(custom(function = "validate_optional_url"))]
    pub image_url: Option<String>,

    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectFilter {
    pub featured_only: bool,
}

impl Resource for Project {
    type Draft = ProjectDraft;
    type Filter = ProjectFilter;

    const NAME: &'static str = "Project";
    const COLLECTION: &'static str = "projects";
    const DEFAULT_SORT: &'static str = "-createdAt";
    const SORT_FIELDS: &'static [(&'static str, &'static str)] = &[
        ("title", "title"),
        ("featured", "featured"),
        ("startDate", "start_date"),
        ("endDate", "end_date"),
        ("createdAt", "created_at"),
        ("updatedAt", "updated_at"),
    ];

    fn schema() -> &'static Schema {
        &PROJECT_SCHEMA
    }

    /// Only `featured=true` narrows the list; any other value lists everything.
    fn filter_from_params(params: &HashMap<String, String>) -> ProjectFilter {
        ProjectFilter {
            featured_only: params.get("featured").is_some_and(|v| v == "true"),
        }
    }

    fn from_draft(id: Uuid, draft: ProjectDraft, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        Project {
            id,
            title: draft.title,
            description: draft.description,
            technologies: draft.technologies,
            link: draft.link,
            image_url: draft.image_url,
            start_date: draft.start_date,
            end_date: draft.end_date,
            featured: draft.featured,
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
