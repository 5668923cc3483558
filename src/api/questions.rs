use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::{
    api::{metrics::record_question_draw, pages},
    models::{ErrorResponse, Question, Tier},
    services::QuestionService,
};

pub const MSG_TABLE_MISSING_TEXT: &str = "❌ 找不到題目資料檔（請確認對應的 CSV 是否存在）";
pub const MSG_TABLE_MISSING_JSON: &str = "題目檔不存在";

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TierQuery {
    /// `junior` or `senior`; anything else means junior.
    pub file: Option<String>,
}

impl TierQuery {
    pub fn tier(&self) -> Tier {
        Tier::from_param(self.file.as_deref())
    }
}

// GET /earn?file=junior|senior
pub async fn earn(
    questions: web::Data<QuestionService>,
    query: web::Query<TierQuery>,
) -> HttpResponse {
    let tier = query.tier();
    log::info!("🎮 GET /earn - file: {}", tier.as_str());

    match questions.draw(tier).await {
        Ok(Some(question)) => {
            record_question_draw();
            pages::html(pages::render_earn(&question, tier))
        }
        Ok(None) => HttpResponse::Ok()
            .content_type("text/plain; charset=utf-8")
            .body(MSG_TABLE_MISSING_TEXT),
        Err(e) => {
            log::error!("❌ Failed to draw question: {}", e);
            HttpResponse::InternalServerError()
                .content_type("text/plain; charset=utf-8")
                .body(e.message().to_string())
        }
    }
}

#[utoipa::path(
    get,
    path = "/next_question",
    tag = "Quiz",
    params(TierQuery),
    responses(
        (status = 200, description = "A random question", body = Question),
        (status = 404, description = "Question table missing", body = ErrorResponse),
        (status = 500, description = "Question table unreadable", body = ErrorResponse)
    )
)]
pub async fn next_question(
    questions: web::Data<QuestionService>,
    query: web::Query<TierQuery>,
) -> HttpResponse {
    let tier = query.tier();
    log::info!("🧧 GET /next_question - file: {}", tier.as_str());

    match questions.draw(tier).await {
        Ok(Some(question)) => {
            record_question_draw();
            HttpResponse::Ok().json(question)
        }
        Ok(None) => {
            log::warn!("❌ No question table for {}", tier.as_str());
            HttpResponse::NotFound().json(ErrorResponse::new(MSG_TABLE_MISSING_JSON))
        }
        Err(e) => {
            log::error!("❌ Failed to draw question: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(e.message()))
        }
    }
}
