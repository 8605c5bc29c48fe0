use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use crate::{
    entities::{
        query::{ListQuery, SortKey},
        resource::Resource,
    },
    errors::AppError,
    repositories::resource::ResourceRepository,
};

/// A sortable field value. Variants order `Null` first, so ascending puts
/// missing values first and descending puts them last.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue {
    Null,
    Bool(bool),
    Text(String),
    Time(DateTime<Utc>),
}

impl From<Option<DateTime<Utc>>> for SortValue {
    fn from(value: Option<DateTime<Utc>>) -> Self {
        value.map_or(SortValue::Null, SortValue::Time)
    }
}

/// Filtering, ordering and uniqueness for a resource kept in memory.
pub trait MemoryDocument: Resource {
    fn matches(&self, filter: &Self::Filter) -> bool;
    fn sort_value(&self, field: &str) -> SortValue;

    /// `(wire field, value)` pairs that must be unique across the collection.
    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

/// Process-local store used for tests and `storage = "memory"`.
pub struct InMemoryRepo<R> {
    documents: DashMap<Uuid, R>,
}

impl<R: MemoryDocument> InMemoryRepo<R> {
    pub fn new() -> Self {
        InMemoryRepo {
            documents: DashMap::new(),
        }
    }

    fn ensure_unique(&self, candidate: &R, skip: Option<&Uuid>) -> Result<(), AppError> {
        for (field, value) in candidate.unique_keys() {
            let taken = self.documents.iter().any(|entry| {
                Some(entry.key()) != skip
                    && entry
                        .value()
                        .unique_keys()
                        .iter()
                        .any(|(other_field, other)| *other_field == field && *other == value)
            });
            if taken {
                return Err(AppError::Duplicate { field: field.to_string() });
            }
        }
        Ok(())
    }
}

impl<R: MemoryDocument> Default for InMemoryRepo<R> {
    fn default() -> Self {
        Self::new()
    }
}

fn compare<R: MemoryDocument>(a: &R, b: &R, sort: &[SortKey]) -> Ordering {
    sort.iter()
        .map(|key| {
            let ordering = a.sort_value(key.field).cmp(&b.sort_value(key.field));
            if key.descending { ordering.reverse() } else { ordering }
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or_else(|| a.id().cmp(&b.id()))
}

#[async_trait]
impl<R: MemoryDocument> ResourceRepository<R> for InMemoryRepo<R> {
    async fn find_all(&self, query: &ListQuery<R::Filter>) -> Result<Vec<R>, AppError> {
        let mut documents: Vec<R> = self
            .documents
            .iter()
            .filter(|entry| entry.value().matches(&query.filter))
            .map(|entry| entry.value().clone())
            .collect();
        documents.sort_by(|a, b| compare(a, b, &query.sort));

        let window = query.window();
        let skipped = documents
            .into_iter()
            .skip(usize::try_from(window.skip).unwrap_or(usize::MAX));

        Ok(match window.take {
            Some(take) => skipped.take(usize::try_from(take).unwrap_or(usize::MAX)).collect(),
            None => skipped.collect(),
        })
    }

    async fn count(&self, filter: &R::Filter) -> Result<u64, AppError> {
        let count = self
            .documents
            .iter()
            .filter(|entry| entry.value().matches(filter))
            .count();
        Ok(count as u64)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<R>, AppError> {
        Ok(self.documents.get(id).map(|entry| entry.value().clone()))
    }

    async fn insert(&self, document: &R) -> Result<R, AppError> {
        self.ensure_unique(document, None)?;
        self.documents.insert(document.id(), document.clone());
        Ok(document.clone())
    }

    async fn replace(&self, id: &Uuid, draft: &R::Draft, updated_at: DateTime<Utc>) -> Result<Option<R>, AppError> {
        let Some(created_at) = self.documents.get(id).map(|entry| entry.value().created_at()) else {
            return Ok(None);
        };

        let replacement = R::from_draft(*id, draft.clone(), created_at, updated_at);
        self.ensure_unique(&replacement, Some(id))?;

        match self.documents.get_mut(id) {
            Some(mut entry) => {
                *entry = replacement.clone();
                Ok(Some(replacement))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &Uuid) -> Result<Option<R>, AppError> {
        Ok(self.documents.remove(id).map(|(_, document)| document))
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        Ok(())
    }
}
