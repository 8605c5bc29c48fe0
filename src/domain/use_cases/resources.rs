use std::sync::Arc;

use serde_json::Value;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::{
        query::{ListQuery, Page, Pagination},
        resource::{timestamp_now, Resource},
    },
    errors::AppError,
    repositories::resource::ResourceRepository,
    utils::valid_uuid::valid_uuid,
};

/// CRUD use cases shared by every portfolio collection.
pub struct ResourceHandler<R: Resource> {
    pub repo: Arc<dyn ResourceRepository<R>>,
}

impl<R: Resource> Clone for ResourceHandler<R> {
    fn clone(&self) -> Self {
        ResourceHandler { repo: Arc::clone(&self.repo) }
    }
}

impl<R: Resource> ResourceHandler<R> {
    pub fn new(repo: Arc<dyn ResourceRepository<R>>) -> Self {
        ResourceHandler { repo }
    }

    #[instrument(skip(self), fields(collection = R::COLLECTION))]
    pub async fn list(&self, query: ListQuery<R::Filter>) -> Result<Page<R>, AppError> {
        let items = self.repo.find_all(&query).await?;
        let total = self.repo.count(&query.filter).await?;

        Ok(Page {
            items,
            pagination: Pagination::new(total, query.page, query.limit),
        })
    }

    pub async fn get(&self, id: &str) -> Result<R, AppError> {
        let id = valid_uuid(id)?;
        self.repo
            .find_by_id(&id)
            .await?
            .ok_or(AppError::NotFound(R::NAME))
    }

    #[instrument(skip(self, payload), fields(collection = R::COLLECTION))]
    pub async fn create(&self, payload: &Value) -> Result<R, AppError> {
        let draft = Self::prepare(payload)?;
        let now = timestamp_now();
        let document = R::from_draft(Uuid::new_v4(), draft, now, now);

        let created = self.repo.insert(&document).await?;
        tracing::info!(id = %created.id(), "{} created", R::NAME);
        Ok(created)
    }

    /// Full replacement. The payload is checked before the id, so an invalid
    /// body against a malformed id reports the validation failure.
    #[instrument(skip(self, payload), fields(collection = R::COLLECTION))]
    pub async fn update(&self, id: &str, payload: &Value) -> Result<R, AppError> {
        let draft = Self::prepare(payload)?;
        let id = valid_uuid(id)?;

        self.repo
            .replace(&id, &draft, timestamp_now())
            .await?
            .ok_or(AppError::NotFound(R::NAME))
    }

    #[instrument(skip(self), fields(collection = R::COLLECTION))]
    pub async fn delete(&self, id: &str) -> Result<R, AppError> {
        let id = valid_uuid(id)?;
        self.repo
            .delete(&id)
            .await?
            .ok_or(AppError::NotFound(R::NAME))
    }

    pub async fn check_connection(&self) -> Result<(), AppError> {
        self.repo.check_connection().await
    }

    /// Schema validation, then the typed checks that guard storage.
    fn prepare(payload: &Value) -> Result<R::Draft, AppError> {
        let document = R::schema().validate(payload).into_result()?;
        let draft: R::Draft = serde_json::from_value(Value::Object(document)).map_err(|e| {
            AppError::Internal(format!("normalized {} payload rejected: {}", R::NAME, e))
        })?;
        draft.validate()?;
        Ok(draft)
    }
}
