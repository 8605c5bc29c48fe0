use actix_web::{get, HttpRequest, HttpResponse, Responder};

#[get("/")]
pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Welcome to Portfolio Backend API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "projects": "/api/projects",
            "certifications": "/api/certifications",
            "achievements": "/api/achievements",
        }
    }))
}

/// Fallback for every unmatched route. `path` keeps the query string.
pub async fn route_not_found(req: HttpRequest) -> impl Responder {
    HttpResponse::NotFound().json(serde_json::json!({
        "success": false,
        "message": "Route not found",
        "path": req.uri().to_string(),
    }))
}
