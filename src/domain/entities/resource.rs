use std::{borrow::Cow, collections::HashMap, fmt};

use chrono::{DateTime, SubsecRound, Utc};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{domain::schema::Schema, utils::valid_url::is_valid_url};

/// A portfolio collection served through the shared CRUD contract.
pub trait Resource: Serialize + Clone + fmt::Debug + Send + Sync + Unpin + 'static {
    /// Normalized, default-filled write document produced by the schema.
    type Draft: Validate + DeserializeOwned + Clone + fmt::Debug + Send + Sync + 'static;
    /// Resource-specific list filter.
    type Filter: Default + Clone + fmt::Debug + Send + Sync + 'static;

    /// Singular display name, used in "not found" messages.
    const NAME: &'static str;
    /// Collection (table) name.
    const COLLECTION: &'static str;
    const DEFAULT_SORT: &'static str;
    /// Sortable fields as `(wire name, column)` pairs.
    const SORT_FIELDS: &'static [(&'static str, &'static str)];

    fn schema() -> &'static Schema;
    fn filter_from_params(params: &HashMap<String, String>) -> Self::Filter;
    fn from_draft(id: Uuid, draft: Self::Draft, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self;
    fn id(&self) -> Uuid;
    fn created_at(&self) -> DateTime<Utc>;
}

/// Current time at millisecond precision, so stored and returned timestamps agree.
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

pub fn validate_optional_url(url: &str) -> Result<(), ValidationError> {
    if url.is_empty() || is_valid_url(url) {
        Ok(())
    } else {
        Err(new_validation_error("invalid_url", "Please provide a valid URL"))
    }
}

pub(crate) fn new_validation_error(code: &'static str, msg: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(msg));
    err
}

pub(crate) fn non_empty_param(params: &HashMap<String, String>, key: &str) -> Option<String> {
    params
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
