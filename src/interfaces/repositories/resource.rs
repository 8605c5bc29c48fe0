use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    entities::{query::ListQuery, resource::Resource},
    errors::AppError,
};

/// One collection of documents. Every write touches exactly one document.
#[async_trait]
pub trait ResourceRepository<R: Resource>: Send + Sync {
    /// The requested page of documents matching the filter, in sort order.
    async fn find_all(&self, query: &ListQuery<R::Filter>) -> Result<Vec<R>, AppError>;
    async fn count(&self, filter: &R::Filter) -> Result<u64, AppError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<R>, AppError>;
    async fn insert(&self, document: &R) -> Result<R, AppError>;
    /// Replaces every user field, keeping the id and creation time.
    async fn replace(&self, id: &Uuid, draft: &R::Draft, updated_at: DateTime<Utc>) -> Result<Option<R>, AppError>;
    async fn delete(&self, id: &Uuid) -> Result<Option<R>, AppError>;
    async fn check_connection(&self) -> Result<(), AppError>;
}
