use actix_web::web;

use crate::{
    entities::{achievement::Achievement, certification::Certification, project::Project},
    handlers::{
        home::{home, route_not_found},
        system::health_check,
    },
};

mod json_error;
mod resources;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home).service(health_check);

    cfg.service(
        web::scope("/api")
            .service(resources::scope::<Project>())
            .service(resources::scope::<Certification>())
            .service(resources::scope::<Achievement>()),
    );

    cfg.configure(json_error::config_routes);
    cfg.default_service(web::to(route_not_found));
}
