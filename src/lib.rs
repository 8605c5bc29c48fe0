mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod shared_repos;
pub mod telemetry;

pub use domain::{entities, schema, use_cases};
pub use interfaces::{handlers, repositories, middlewares, routes};
pub use infrastructure::{auth, db, utils, web};

use auth::jwt::JwtService;
use entities::{achievement::Achievement, certification::Certification, project::Project};
use settings::{AppConfig, StorageBackend};
use shared_repos::SharedRepositories;
use use_cases::resources::ResourceHandler;

pub struct AppState {
    pub projects: ResourceHandler<Project>,
    pub certifications: ResourceHandler<Certification>,
    pub achievements: ResourceHandler<Achievement>,
    pub jwt_service: JwtService,
    pub storage: StorageBackend,
}

impl AppState {
    pub fn new(config: &AppConfig, repos: SharedRepositories) -> Self {
        AppState {
            projects: ResourceHandler::new(repos.projects),
            certifications: ResourceHandler::new(repos.certifications),
            achievements: ResourceHandler::new(repos.achievements),
            jwt_service: JwtService::new(config),
            storage: config.storage,
        }
    }
}
