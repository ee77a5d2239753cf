use std::sync::Arc;

use actix_web::{web, HttpRequest, HttpResponse};

use crate::core::AppError;
use crate::middleware::auth::AuthenticatedUser;
use crate::modules::auth::models::LoginRequest;
use crate::modules::auth::services::AuthService;

/// POST /auth/login
pub async fn login(
    service: web::Data<Arc<AuthService>>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();

    if request.phone_number.trim().is_empty() || request.password.is_empty() {
        return Err(AppError::validation("Phone number and password are required"));
    }

    let response = service.login(&request.phone_number, &request.password).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": response,
    })))
}

/// POST /auth/logout: revokes the token presented in the Authorization header.
pub async fn logout(
    service: web::Data<Arc<AuthService>>,
    _user: AuthenticatedUser,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::unauthorized("Not authorized to access this route"))?;

    service.logout(token).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": {},
    })))
}

/// GET /auth/me
pub async fn me(
    service: web::Data<Arc<AuthService>>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user = service.current_user(&user.id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": user,
    })))
}

/// Configure auth routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/login", web::post().to(login))
            .route("/logout", web::post().to(logout))
            .route("/me", web::get().to(me)),
    );
}
