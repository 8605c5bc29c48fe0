use std::time::Duration;

use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use humantime::format_duration;
use serde::Serialize;

use crate::{constants::START_TIME, AppState};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthCheckResponse {
    status: &'static str,
    uptime: String,
    started_at: String,
    timestamp: String,
    version: &'static str,
    storage: String,
    database: &'static str,
}

#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let now = Utc::now();
    let uptime = now.signed_duration_since(*START_TIME).num_seconds().max(0) as u64;

    let database = match state.projects.check_connection().await {
        Ok(()) => "OK",
        Err(err) => {
            tracing::warn!("Health check could not reach storage: {}", err);
            "Unavailable"
        }
    };

    HttpResponse::Ok().json(HealthCheckResponse {
        status: "healthy",
        uptime: format_duration(Duration::from_secs(uptime)).to_string(),
        started_at: START_TIME.to_rfc3339(),
        timestamp: now.to_rfc3339(),
        version: env!("CARGO_PKG_VERSION"),
        storage: state.storage.to_string(),
        database,
    })
}
