use std::{collections::HashMap, fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::domain::{
    entities::resource::{new_validation_error, non_empty_param, validate_optional_url, Resource},
    schema::{Fallback, Field, Schema},
};

const MIN_TITLE_LENGTH: u64 = 3;
const MAX_TITLE_LENGTH: u64 = 200;
const MIN_DESCRIPTION_LENGTH: usize = 10;
const MAX_DESCRIPTION_LENGTH: usize = 2000;

pub const CATEGORIES: &[&str] = &["awards", "publications", "recognition", "other"];

pub static ACHIEVEMENT_SCHEMA: Schema = Schema::new(&[
    Field::text("title", MIN_TITLE_LENGTH as usize, MAX_TITLE_LENGTH as usize).required(),
    Field::text("description", MIN_DESCRIPTION_LENGTH, MAX_DESCRIPTION_LENGTH).nullable().allow_empty(),
    Field::date("date").nullable().allow_empty(),
    Field::one_of("category", CATEGORIES).default_to(Fallback::Text("other")),
    Field::url("imageUrl"),
    Field::url("link"),
]);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    Awards,
    Publications,
    Recognition,
    #[default]
    Other,
}

impl AchievementCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementCategory::Awards => "awards",
            AchievementCategory::Publications => "publications",
            AchievementCategory::Recognition => "recognition",
            AchievementCategory::Other => "other",
        }
    }
}

impl fmt::Display for AchievementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AchievementCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "awards" => Ok(AchievementCategory::Awards),
            "publications" => Ok(AchievementCategory::Publications),
            "recognition" => Ok(AchievementCategory::Recognition),
            "other" => Ok(AchievementCategory::Other),
            _ => Err(format!("unknown achievement category: {}", s)),
        }
    }
}

// ───── Database Models ───────────────────────────────────────────────
#[derive(Debug, sqlx::FromRow)]
pub struct AchievementRow {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub category: String,
    pub image_url: Option<String>,
    pub link: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub category: AchievementCategory,
    pub image_url: Option<String>,
    pub link: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AchievementDraft {
    #[validate(length(min = MIN_TITLE_LENGTH, max = MAX_TITLE_LENGTH))]
    pub title: String,

    #[validate(custom(function = "validate_description"))]
    pub description: Option<String>,

    pub date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub category: AchievementCategory,

    #[validate(custom(function = "validate_optional_url"))]
    pub image_url: Option<String>,

    #[validate(custom(function = "validate_optional_url"))]
    pub link: Option<String>,
}

/// Description is optional, so an empty string passes; anything else is length-bounded.
pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    let len = description.chars().count();
    if description.is_empty() || (MIN_DESCRIPTION_LENGTH..=MAX_DESCRIPTION_LENGTH).contains(&len) {
        Ok(())
    } else {
        Err(new_validation_error("description_length", "Description must be between 10 and 2000 characters"))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AchievementFilter {
    /// Exact category match. Unknown categories simply match nothing.
    pub category: Option<String>,
}

impl From<AchievementRow> for Achievement {
    fn from(row: AchievementRow) -> Self {
        Achievement {
            id: row.id,
            title: row.title,
            description: row.description,
            date: row.date,
            category: row.category.parse().unwrap_or_default(),
            image_url: row.image_url,
            link: row.link,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl Resource for Achievement {
    type Draft = AchievementDraft;
    type Filter = AchievementFilter;

    const NAME: &'static str = "Achievement";
    const COLLECTION: &'static str = "achievements";
    const DEFAULT_SORT: &'static str = "-date";
    const SORT_FIELDS: &'static [(&'static str, &'static str)] = &[
        ("title", "title"),
        ("date", "date"),
        ("category", "category"),
        ("createdAt", "created_at"),
        ("updatedAt", "updated_at"),
    ];

    fn schema() -> &'static Schema {
        &ACHIEVEMENT_SCHEMA
    }

    fn filter_from_params(params: &HashMap<String, String>) -> AchievementFilter {
        AchievementFilter {
            category: non_empty_param(params, "category"),
        }
    }

    fn from_draft(id: Uuid, draft: AchievementDraft, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        Achievement {
            id,
            title: draft.title,
            description: draft.description,
            date: draft.date,
            category: draft.category,
            image_url: draft.image_url,
            link: draft.link,
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
