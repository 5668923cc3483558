use actix_web::{web, HttpResponse};

use crate::{
    models::{
        CansResponse, CredentialsRequest, FailureResponse, GetCansRequest, LoginResponse,
        RegisterResponse, UpdateCansRequest,
    },
    services::UserService,
    utils::AppError,
};

/// Recognized failures are answered with 200 and `success: false` because the
/// browser client only reads `message`; I/O failures are a 500.
fn failure(e: &AppError) -> HttpResponse {
    match e {
        AppError::Storage(_) => {
            log::error!("❌ User store failure: {}", e);
            HttpResponse::InternalServerError().json(FailureResponse::new(e.message()))
        }
        _ => HttpResponse::Ok().json(FailureResponse::new(e.message())),
    }
}

#[utoipa::path(
    post,
    path = "/register",
    tag = "Accounts",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Account created; on failure `{success: false, message}` (empty or too long username, or username taken)", body = RegisterResponse)
    )
)]
pub async fn register(
    users: web::Data<UserService>,
    request: web::Json<CredentialsRequest>,
) -> HttpResponse {
    let username = request.username.as_deref().unwrap_or_default();
    let password = request.password.as_deref().unwrap_or_default();
    log::info!("📝 POST /register - username: {}", username);

    match users.register(username, password).await {
        Ok(username) => {
            log::info!("✅ Registration successful: {}", username);
            HttpResponse::Ok().json(RegisterResponse {
                success: true,
                username,
            })
        }
        Err(e) => {
            log::warn!("❌ Registration failed: {} - {}", username, e);
            failure(&e)
        }
    }
}

#[utoipa::path(
    post,
    path = "/get_cans",
    tag = "Accounts",
    request_body = GetCansRequest,
    responses(
        (status = 200, description = "Current balance; on failure `{success: false, message}` (unknown account)", body = CansResponse)
    )
)]
pub async fn get_cans(
    users: web::Data<UserService>,
    request: web::Json<GetCansRequest>,
) -> HttpResponse {
    let username = request.username.as_deref().unwrap_or_default();
    log::info!("🥫 POST /get_cans - username: {}", username);

    match users.get_balance(username).await {
        Ok(cans) => HttpResponse::Ok().json(CansResponse {
            success: true,
            cans,
        }),
        Err(e) => {
            log::warn!("❌ Balance lookup failed: {} - {}", username, e);
            failure(&e)
        }
    }
}

#[utoipa::path(
    post,
    path = "/update_cans",
    tag = "Accounts",
    request_body = UpdateCansRequest,
    responses(
        (status = 200, description = "Balance overwritten; on failure `{success: false, message}` (missing field or unknown account)", body = CansResponse),
        (status = 400, description = "Malformed body, e.g. negative cans", body = FailureResponse)
    )
)]
pub async fn update_cans(
    users: web::Data<UserService>,
    request: web::Json<UpdateCansRequest>,
) -> HttpResponse {
    let username = request.username.as_deref().unwrap_or_default();
    log::info!("🥫 POST /update_cans - username: {}, cans: {:?}", username, request.cans);

    match users.set_balance(username, request.cans).await {
        Ok(cans) => {
            log::info!("✅ Balance updated: {} -> {}", username, cans);
            HttpResponse::Ok().json(CansResponse {
                success: true,
                cans,
            })
        }
        Err(e) => {
            log::warn!("❌ Balance update failed: {} - {}", username, e);
            failure(&e)
        }
    }
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Accounts",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Credentials accepted; on failure `{success: false, message}` (no user store, unreadable store, or bad credentials)", body = LoginResponse)
    )
)]
pub async fn login(
    users: web::Data<UserService>,
    request: web::Json<CredentialsRequest>,
) -> HttpResponse {
    let username = request.username.as_deref().unwrap_or_default();
    let password = request.password.as_deref().unwrap_or_default();
    log::info!("🔐 POST /login - username: {}", username);

    match users.authenticate(username, password).await {
        Ok(account) => {
            log::info!("✅ Login successful: {}", account.username);
            HttpResponse::Ok().json(LoginResponse {
                success: true,
                username: account.username,
                cans: account.cans,
            })
        }
        Err(e) => {
            log::warn!("❌ Login failed: {} - {}", username, e);
            failure(&e)
        }
    }
}
