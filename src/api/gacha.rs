use actix_web::{web, HttpResponse};

use crate::{
    api::{metrics::record_gacha_draw, pages},
    models::{ErrorResponse, GachaResult, Rarity},
    services::GachaService,
    utils::AppError,
};

// GET /gachapon
pub async fn gachapon() -> HttpResponse {
    log::info!("🎰 GET /gachapon");
    pages::html(pages::render_gachapon())
}

#[utoipa::path(
    get,
    path = "/draw_gacha",
    tag = "Gacha",
    responses(
        (status = 200, description = "Drawn character", body = GachaResult),
        (status = 404, description = "Reward table missing, or no character of the rolled rarity", body = ErrorResponse),
        (status = 500, description = "Reward table unreadable", body = ErrorResponse)
    )
)]
pub async fn draw_gacha(gacha: web::Data<GachaService>) -> HttpResponse {
    log::info!("🎰 GET /draw_gacha");

    match gacha.draw().await {
        Ok(result) => {
            log::info!("✅ Gacha draw: {} ({})", result.character, result.rarity.label());
            record_gacha_draw(result.rarity == Rarity::SuperRare);
            HttpResponse::Ok().json(result)
        }
        Err(e @ (AppError::NotFound(_) | AppError::NoMatchingRarity(_))) => {
            log::warn!("❌ Gacha draw failed: {}", e);
            HttpResponse::NotFound().json(ErrorResponse::new(e.message()))
        }
        Err(e) => {
            log::error!("❌ Gacha draw failed: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(e.message()))
        }
    }
}
