use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static REQUEST_COUNT: AtomicU64 = AtomicU64::new(0);
static ERROR_COUNT: AtomicU64 = AtomicU64::new(0);
static QUESTION_DRAWS: AtomicU64 = AtomicU64::new(0);
static GACHA_DRAWS: AtomicU64 = AtomicU64::new(0);
static SUPER_RARE_DRAWS: AtomicU64 = AtomicU64::new(0);

pub fn increment_request_count() {
    REQUEST_COUNT.fetch_add(1, Ordering::Relaxed);
}

pub fn increment_error_count() {
    ERROR_COUNT.fetch_add(1, Ordering::Relaxed);
}

pub fn record_question_draw() {
    QUESTION_DRAWS.fetch_add(1, Ordering::Relaxed);
}

pub fn record_gacha_draw(super_rare: bool) {
    GACHA_DRAWS.fetch_add(1, Ordering::Relaxed);
    if super_rare {
        SUPER_RARE_DRAWS.fetch_add(1, Ordering::Relaxed);
    }
}

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct MetricsResponse {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub question_draws_total: u64,
    pub gacha_draws_total: u64,
    pub gacha_super_rare_total: u64,
}

impl MetricsResponse {
    pub fn snapshot() -> Self {
        Self {
            http_requests_total: REQUEST_COUNT.load(Ordering::Relaxed),
            http_errors_total: ERROR_COUNT.load(Ordering::Relaxed),
            question_draws_total: QUESTION_DRAWS.load(Ordering::Relaxed),
            gacha_draws_total: GACHA_DRAWS.load(Ordering::Relaxed),
            gacha_super_rare_total: SUPER_RARE_DRAWS.load(Ordering::Relaxed),
        }
    }

    pub fn to_prometheus(&self) -> String {
        let counters = [
            ("http_requests_total", "Total number of HTTP requests", self.http_requests_total),
            ("http_errors_total", "Total number of HTTP 4xx/5xx responses", self.http_errors_total),
            ("question_draws_total", "Questions served", self.question_draws_total),
            ("gacha_draws_total", "Successful gacha draws", self.gacha_draws_total),
            ("gacha_super_rare_total", "Gacha draws that landed on super-rare", self.gacha_super_rare_total),
        ];

        counters
            .iter()
            .map(|(name, help, value)| {
                format!("# HELP {name} {help}\n# TYPE {name} counter\n{name} {value}\n")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[utoipa::path(
    get,
    path = "/metrics",
    tag = "Health",
    responses(
        (status = 200, description = "Prometheus counters", body = String, content_type = "text/plain")
    )
)]
pub async fn get_metrics() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(MetricsResponse::snapshot().to_prometheus())
}
