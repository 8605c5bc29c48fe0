use std::collections::HashMap;

use actix_web::{web, HttpResponse, Responder};
use serde_json::Value;
use tracing::instrument;

use crate::{
    entities::{
        achievement::Achievement,
        certification::Certification,
        envelope::ApiResponse,
        project::Project,
        query::ListQuery,
        resource::Resource,
    },
    errors::AppError,
    use_cases::{extractors::AdminClaims, resources::ResourceHandler},
    AppState,
};

/// Resolves the use-case handler serving `Self` from the shared state.
pub trait ResourceState: Resource {
    fn handler(state: &AppState) -> &ResourceHandler<Self>;
}

impl ResourceState for Project {
    fn handler(state: &AppState) -> &ResourceHandler<Self> {
        &state.projects
    }
}

impl ResourceState for Certification {
    fn handler(state: &AppState) -> &ResourceHandler<Self> {
        &state.certifications
    }
}

impl ResourceState for Achievement {
    fn handler(state: &AppState) -> &ResourceHandler<Self> {
        &state.achievements
    }
}

#[instrument(skip(state, params), fields(collection = R::COLLECTION))]
pub async fn list<R: ResourceState>(
    state: web::Data<AppState>,
    params: web::Query<HashMap<String, String>>,
) -> Result<impl Responder, AppError> {
    let query = ListQuery::from_params::<R>(&params)?;
    let page = R::handler(&state).list(query).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::paginated(page.items, page.pagination)))
}

#[instrument(skip(state), fields(collection = R::COLLECTION))]
pub async fn get_by_id<R: ResourceState>(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let document = R::handler(&state).get(&id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(document)))
}

#[instrument(skip(state, payload, claims), fields(collection = R::COLLECTION, admin = %claims.0.sub))]
pub async fn create<R: ResourceState>(
    claims: AdminClaims,
    state: web::Data<AppState>,
    payload: web::Json<Value>,
) -> Result<impl Responder, AppError> {
    let document = R::handler(&state).create(&payload).await?;

    Ok(HttpResponse::Created().json(ApiResponse::with_message(
        document,
        format!("{} created successfully", R::NAME),
    )))
}

#[instrument(skip(state, payload, claims), fields(collection = R::COLLECTION, admin = %claims.0.sub))]
pub async fn update<R: ResourceState>(
    claims: AdminClaims,
    state: web::Data<AppState>,
    id: web::Path<String>,
    payload: web::Json<Value>,
) -> Result<impl Responder, AppError> {
    let document = R::handler(&state).update(&id, &payload).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        document,
        format!("{} updated successfully", R::NAME),
    )))
}

#[instrument(skip(state, claims), fields(collection = R::COLLECTION, admin = %claims.0.sub))]
pub async fn delete<R: ResourceState>(
    claims: AdminClaims,
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let document = R::handler(&state).delete(&id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        document,
        format!("{} deleted successfully", R::NAME),
    )))
}
