use actix_web::HttpResponse;

use ft_shared::types::HealthResponse;

/// Service name reported by the health check
pub const SERVICE_NAME: &str = "fintrack-api";

/// Handler for GET /health
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy(SERVICE_NAME, env!("CARGO_PKG_VERSION")))
}
