use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::{AppError, PageQuery};
use crate::middleware::auth::AuthenticatedUser;
use crate::modules::appointments::models::{CreateAppointmentRequest, UpdateAppointmentRequest};
use crate::modules::appointments::services::AppointmentService;

/// GET /appointments
pub async fn list_appointments(
    service: web::Data<Arc<AppointmentService>>,
    _user: AuthenticatedUser,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let page = service.list(query.into_inner()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "count": page.appointments.len(),
        "pagination": page.pagination,
        "data": page.appointments,
    })))
}

/// GET /appointments/today
pub async fn list_today_appointments(
    service: web::Data<Arc<AppointmentService>>,
    _user: AuthenticatedUser,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let page = service.list_today(query.into_inner()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "count": page.appointments.len(),
        "pagination": page.pagination,
        "data": page.appointments,
    })))
}

/// GET /appointments/{id}
pub async fn get_appointment(
    service: web::Data<Arc<AppointmentService>>,
    _user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let appointment = service.get(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": appointment,
    })))
}

/// POST /appointments
pub async fn create_appointment(
    service: web::Data<Arc<AppointmentService>>,
    user: AuthenticatedUser,
    request: web::Json<CreateAppointmentRequest>,
) -> Result<HttpResponse, AppError> {
    let appointment = service.create(request.into_inner(), &user).await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "success": true,
        "data": appointment,
    })))
}

/// PUT /appointments/{id}
pub async fn update_appointment(
    service: web::Data<Arc<AppointmentService>>,
    _user: AuthenticatedUser,
    path: web::Path<String>,
    request: web::Json<UpdateAppointmentRequest>,
) -> Result<HttpResponse, AppError> {
    let appointment = service
        .update(&path.into_inner(), request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": appointment,
    })))
}

/// DELETE /appointments/{id}: cancels rather than deletes.
pub async fn cancel_appointment(
    service: web::Data<Arc<AppointmentService>>,
    _user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let appointment = service.cancel(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": appointment,
    })))
}

/// Configure appointment routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/appointments")
            .route("/today", web::get().to(list_today_appointments))
            .route("", web::get().to(list_appointments))
            .route("", web::post().to(create_appointment))
            .route("/{id}", web::get().to(get_appointment))
            .route("/{id}", web::put().to(update_appointment))
            .route("/{id}", web::delete().to(cancel_appointment)),
    );
}
