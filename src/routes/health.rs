use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;

use crate::error::AppError;

/// Health check endpoint
///
/// Returns the current status of the API and timestamp.
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "timestamp": Utc::now()
    }))
}

/// Database connectivity check.
#[get("/db-ping")]
pub async fn db_ping(pool: web::Data<PgPool>) -> Result<impl Responder, AppError> {
    sqlx::query("SELECT 1").execute(&**pool).await?;

    Ok(HttpResponse::Ok().json(json!({
        "db": "ok"
    })))
}
