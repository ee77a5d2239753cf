use std::str::FromStr;
use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::AppError;
use crate::middleware::auth::AuthenticatedUser;
use crate::modules::auth::models::UserRole;
use crate::modules::catalog::models::{
    CreateServiceRequest, Service, ServiceCategory, UpdateServiceRequest,
};
use crate::modules::catalog::repositories::ServiceRepository;

/// GET /services: active services, grouped by category then name.
pub async fn list_services(
    repo: web::Data<Arc<ServiceRepository>>,
    _user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let services = repo.list_active().await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "count": services.len(),
        "data": services,
    })))
}

/// GET /services/category/{category}
pub async fn list_services_by_category(
    repo: web::Data<Arc<ServiceRepository>>,
    _user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let raw = path.into_inner();
    let category = ServiceCategory::from_str(&raw)
        .map_err(|_| AppError::validation(format!("'{}' is not a valid category", raw)))?;

    let services = repo.list_by_category(category).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "count": services.len(),
        "data": services,
    })))
}

/// GET /services/{id}
pub async fn get_service(
    repo: web::Data<Arc<ServiceRepository>>,
    _user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let service = repo
        .find_by_id(&path.into_inner())
        .await?
        .ok_or_else(|| AppError::not_found("Service"))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": service,
    })))
}

/// POST /services (owners only).
pub async fn create_service(
    repo: web::Data<Arc<ServiceRepository>>,
    user: AuthenticatedUser,
    request: web::Json<CreateServiceRequest>,
) -> Result<HttpResponse, AppError> {
    user.authorize(&[UserRole::Owner])?;

    let service = Service::new(request.into_inner())?;
    repo.create(&service).await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "success": true,
        "data": service,
    })))
}

/// PUT /services/{id} (owners only).
pub async fn update_service(
    repo: web::Data<Arc<ServiceRepository>>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    request: web::Json<UpdateServiceRequest>,
) -> Result<HttpResponse, AppError> {
    user.authorize(&[UserRole::Owner])?;

    let mut service = repo
        .find_by_id(&path.into_inner())
        .await?
        .ok_or_else(|| AppError::not_found("Service"))?;

    service.apply_update(request.into_inner())?;
    repo.update(&service).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": service,
    })))
}

/// DELETE /services/{id} (owners only). Deactivates rather than deletes so
/// historical appointments keep resolving.
pub async fn delete_service(
    repo: web::Data<Arc<ServiceRepository>>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    user.authorize(&[UserRole::Owner])?;

    let deactivated = repo.deactivate(&path.into_inner()).await?;
    if !deactivated {
        return Err(AppError::not_found("Service"));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": {},
    })))
}

/// Configure service routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/services")
            .route("/category/{category}", web::get().to(list_services_by_category))
            .route("", web::get().to(list_services))
            .route("", web::post().to(create_service))
            .route("/{id}", web::get().to(get_service))
            .route("/{id}", web::put().to(update_service))
            .route("/{id}", web::delete().to(delete_service)),
    );
}
