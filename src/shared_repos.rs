use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    entities::{achievement::Achievement, certification::Certification, project::Project},
    repositories::{memory::InMemoryRepo, resource::ResourceRepository, sqlx_repo::SqlxRepo},
};

/// One repository per collection, all on the same backend.
#[derive(Clone)]
pub struct SharedRepositories {
    pub projects: Arc<dyn ResourceRepository<Project>>,
    pub certifications: Arc<dyn ResourceRepository<Certification>>,
    pub achievements: Arc<dyn ResourceRepository<Achievement>>,
}

impl SharedRepositories {
    pub fn postgres(pool: PgPool) -> Self {
        let repo = SqlxRepo::new(pool);
        SharedRepositories {
            projects: Arc::new(repo.clone()),
            certifications: Arc::new(repo.clone()),
            achievements: Arc::new(repo),
        }
    }

    pub fn in_memory() -> Self {
        SharedRepositories {
            projects: Arc::new(InMemoryRepo::<Project>::new()),
            certifications: Arc::new(InMemoryRepo::<Certification>::new()),
            achievements: Arc::new(InMemoryRepo::<Achievement>::new()),
        }
    }
}
