use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Vocabulary Gacha API",
        version = "0.1.0",
        description = "Vocabulary quiz with a can-currency ledger and a gacha reward draw.\n\n**Accounts:** there are no sessions; every account request names the username explicitly."
    ),
    paths(
        // Quiz
        crate::api::questions::next_question,

        // Gacha
        crate::api::gacha::draw_gacha,

        // Accounts
        crate::api::accounts::register,
        crate::api::accounts::get_cans,
        crate::api::accounts::update_cans,
        crate::api::accounts::login,

        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,
    ),
    components(
        schemas(
            crate::models::Question,
            crate::models::GachaResult,
            crate::models::Rarity,
            crate::models::CredentialsRequest,
            crate::models::GetCansRequest,
            crate::models::UpdateCansRequest,
            crate::models::RegisterResponse,
            crate::models::CansResponse,
            crate::models::LoginResponse,
            crate::models::FailureResponse,
            crate::models::ErrorResponse,
            crate::api::health::HealthResponse,
            crate::api::health::DataFiles,
            crate::api::metrics::MetricsResponse,
        )
    ),
    tags(
        (name = "Quiz", description = "Random vocabulary questions from the junior and senior tables."),
        (name = "Gacha", description = "Two-stage reward draw: rarity roll, then a uniform pick within that rarity."),
        (name = "Accounts", description = "Registration, login and can balances stored in the user file."),
        (name = "Health", description = "Health check and request counters."),
    )
)]
pub struct ApiDoc;
