use actix_web::{get, web, HttpResponse};

use crate::{app_state::AppState, errors::AppError, models::dto::HealthResponse};

#[get("/health")]
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        storage: state.storage_name().to_string(),
    })
}

/// Readiness probe; pings MongoDB when that backend is in use.
#[get("/health/ready")]
pub async fn ready(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    if let Some(db) = &state.db {
        db.health_check().await?;
    }
    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ready".to_string(),
        storage: state.storage_name().to_string(),
    }))
}
