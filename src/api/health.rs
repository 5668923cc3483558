use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::AppConfig;

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct DataFiles {
    pub junior_questions: bool,
    pub senior_questions: bool,
    pub gacha: bool,
    pub users: bool,
}

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: i64,
    pub data_files: DataFiles,
}

async fn exists(path: &Path) -> bool {
    tokio::fs::metadata(path).await.is_ok()
}

/// Reports `degraded` while a question or gacha table is missing. A missing
/// user store is normal before the first registration.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service status and data file availability", body = HealthResponse)
    )
)]
pub async fn health_check(config: web::Data<AppConfig>) -> impl Responder {
    let data_files = DataFiles {
        junior_questions: exists(&config.junior_questions_file).await,
        senior_questions: exists(&config.senior_questions_file).await,
        gacha: exists(&config.gacha_file).await,
        users: exists(&config.users_file).await,
    };
    let healthy = data_files.junior_questions && data_files.senior_questions && data_files.gacha;

    HttpResponse::Ok().json(HealthResponse {
        status: (if healthy { "healthy" } else { "degraded" }).to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().timestamp(),
        data_files,
    })
}
