use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::AppError;
use crate::middleware::auth::AuthenticatedUser;
use crate::modules::auth::models::UserRole;
use crate::modules::catalog::models::{CreatePackageRequest, Package, UpdatePackageRequest};
use crate::modules::catalog::repositories::{PackageRepository, ServiceRepository};

/// GET /packages
pub async fn list_packages(
    repo: web::Data<Arc<PackageRepository>>,
    _user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let packages = repo.list_active().await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "count": packages.len(),
        "data": packages,
    })))
}

/// GET /packages/{id}
pub async fn get_package(
    repo: web::Data<Arc<PackageRepository>>,
    _user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let package = repo
        .find_by_id(&path.into_inner())
        .await?
        .ok_or_else(|| AppError::not_found("Package"))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": package,
    })))
}

/// POST /packages (owners only). Every referenced service must exist.
pub async fn create_package(
    repo: web::Data<Arc<PackageRepository>>,
    service_repo: web::Data<Arc<ServiceRepository>>,
    user: AuthenticatedUser,
    request: web::Json<CreatePackageRequest>,
) -> Result<HttpResponse, AppError> {
    user.authorize(&[UserRole::Owner])?;

    let request = request.into_inner();

    let found = service_repo.find_by_ids(&request.service_ids).await?;
    if found.len() != request.service_ids.len() {
        return Err(AppError::validation("One or more services not found"));
    }

    let package = Package::new(&request)?;
    repo.create(&package, &request.service_ids).await?;

    let package = repo
        .find_by_id(&package.id)
        .await?
        .ok_or_else(|| AppError::internal("Package vanished after insert"))?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "success": true,
        "data": package,
    })))
}

/// PUT /packages/{id} (owners only).
pub async fn update_package(
    repo: web::Data<Arc<PackageRepository>>,
    service_repo: web::Data<Arc<ServiceRepository>>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    request: web::Json<UpdatePackageRequest>,
) -> Result<HttpResponse, AppError> {
    user.authorize(&[UserRole::Owner])?;

    let request = request.into_inner();
    let id = path.into_inner();

    let mut package = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Package"))?;

    if let Some(ref service_ids) = request.service_ids {
        if service_ids.is_empty() {
            return Err(AppError::validation(
                "A package must include at least one service",
            ));
        }
        let found = service_repo.find_by_ids(service_ids).await?;
        if found.len() != service_ids.len() {
            return Err(AppError::validation("One or more services not found"));
        }
    }

    package.apply_update(&request)?;
    repo.update(&package, request.service_ids.as_deref()).await?;

    let package = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Package"))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": package,
    })))
}

/// DELETE /packages/{id} (owners only).
pub async fn delete_package(
    repo: web::Data<Arc<PackageRepository>>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    user.authorize(&[UserRole::Owner])?;

    let deleted = repo.delete(&path.into_inner()).await?;
    if !deleted {
        return Err(AppError::not_found("Package"));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": {},
    })))
}

/// Configure package routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/packages")
            .route("", web::get().to(list_packages))
            .route("", web::post().to(create_package))
            .route("/{id}", web::get().to(get_package))
            .route("/{id}", web::put().to(update_package))
            .route("/{id}", web::delete().to(delete_package)),
    );
}
