use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::AppError;
use crate::middleware::auth::AuthenticatedUser;
use crate::modules::auth::models::UserRole;
use crate::modules::staff::models::{CreateStaffRequest, StaffMember, UpdateStaffRequest};
use crate::modules::staff::repositories::StaffRepository;

/// GET /staff (owners only).
pub async fn list_staff(
    repo: web::Data<Arc<StaffRepository>>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    user.authorize(&[UserRole::Owner])?;

    let staff = repo.list().await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "count": staff.len(),
        "data": staff,
    })))
}

/// POST /staff (owners only).
pub async fn create_staff(
    repo: web::Data<Arc<StaffRepository>>,
    user: AuthenticatedUser,
    request: web::Json<CreateStaffRequest>,
) -> Result<HttpResponse, AppError> {
    user.authorize(&[UserRole::Owner])?;

    let staff = StaffMember::new(request.into_inner())?;
    repo.create(&staff).await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "success": true,
        "data": staff,
    })))
}

/// PUT /staff/{id} (owners only).
pub async fn update_staff(
    repo: web::Data<Arc<StaffRepository>>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    request: web::Json<UpdateStaffRequest>,
) -> Result<HttpResponse, AppError> {
    user.authorize(&[UserRole::Owner])?;

    let mut staff = repo
        .find_by_id(&path.into_inner())
        .await?
        .ok_or_else(|| AppError::not_found("Staff member"))?;

    staff.apply_update(request.into_inner())?;
    repo.update(&staff).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": staff,
    })))
}

/// DELETE /staff/{id} (owners only).
pub async fn delete_staff(
    repo: web::Data<Arc<StaffRepository>>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    user.authorize(&[UserRole::Owner])?;

    let deleted = repo.delete(&path.into_inner()).await?;
    if !deleted {
        return Err(AppError::not_found("Staff member"));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": {},
        "message": "Staff member deleted successfully",
    })))
}

/// Configure staff routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/staff")
            .route("", web::get().to(list_staff))
            .route("", web::post().to(create_staff))
            .route("/{id}", web::put().to(update_staff))
            .route("/{id}", web::delete().to(delete_staff)),
    );
}
