use actix_cors::Cors;
use actix_web::http::{header, Method};

use crate::settings::AppConfig;

/// CORS policy built from `cors_allowed_origins`. A `*` entry allows any origin.
pub fn build_cors(config: &AppConfig) -> Cors {
    let origins = config.cors_origins();

    let cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600);

    if origins.iter().any(|origin| origin == "*") {
        cors.allow_any_origin()
    } else {
        origins
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin))
    }
}
