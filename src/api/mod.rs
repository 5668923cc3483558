pub mod accounts;
pub mod gacha;
pub mod health;
pub mod metrics;
pub mod pages;
pub mod questions;
pub mod swagger;

use actix_web::{error::InternalError, web, HttpResponse};

use crate::models::FailureResponse;

/// Malformed account bodies get the same `{success: false, message}` shape as
/// every other account failure.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        log::warn!("❌ Rejected body on {}: {}", req.path(), err);
        let response = HttpResponse::BadRequest().json(FailureResponse::new(err.to_string()));
        InternalError::from_response(err, response).into()
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/", web::get().to(pages::home))
        .route("/health", web::get().to(health::health_check))
        .route("/metrics", web::get().to(metrics::get_metrics))
        // Quiz
        .route("/earn", web::get().to(questions::earn))
        .route("/next_question", web::get().to(questions::next_question))
        // Accounts
        .route("/register", web::post().to(accounts::register))
        .route("/get_cans", web::post().to(accounts::get_cans))
        .route("/update_cans", web::post().to(accounts::update_cans))
        .route("/login", web::post().to(accounts::login))
        // Gacha
        .route("/gachapon", web::get().to(gacha::gachapon))
        .route("/draw_gacha", web::get().to(gacha::draw_gacha));
}

#[cfg(test)]
mod tests;
