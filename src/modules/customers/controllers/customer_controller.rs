use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::{AppError, PageQuery, Pagination};
use crate::middleware::auth::AuthenticatedUser;
use crate::modules::auth::models::UserRole;
use crate::modules::customers::models::{CreateCustomerRequest, Customer, UpdateCustomerRequest};
use crate::modules::customers::repositories::CustomerRepository;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// GET /customers
pub async fn list_customers(
    repo: web::Data<Arc<CustomerRepository>>,
    _user: AuthenticatedUser,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let total = repo.count().await?;
    let pagination = Pagination::from_query(query.into_inner(), total);
    let customers = repo.list(pagination.skip, pagination.limit).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "count": customers.len(),
        "pagination": pagination,
        "data": customers,
    })))
}

/// GET /customers/search?q=
pub async fn search_customers(
    repo: web::Data<Arc<CustomerRepository>>,
    _user: AuthenticatedUser,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, AppError> {
    let term = query.q.trim();
    if term.is_empty() {
        return Err(AppError::validation("Search query is required"));
    }

    let customers = repo.search(term).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "count": customers.len(),
        "data": customers,
    })))
}

/// GET /customers/{id}
pub async fn get_customer(
    repo: web::Data<Arc<CustomerRepository>>,
    _user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let customer = repo
        .find_by_id(&path.into_inner())
        .await?
        .ok_or_else(|| AppError::not_found("Customer"))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": customer,
    })))
}

/// POST /customers
pub async fn create_customer(
    repo: web::Data<Arc<CustomerRepository>>,
    _user: AuthenticatedUser,
    request: web::Json<CreateCustomerRequest>,
) -> Result<HttpResponse, AppError> {
    let customer = Customer::new(request.into_inner())?;
    repo.create(&customer).await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "success": true,
        "data": customer,
    })))
}

/// PUT /customers/{id}
pub async fn update_customer(
    repo: web::Data<Arc<CustomerRepository>>,
    _user: AuthenticatedUser,
    path: web::Path<String>,
    request: web::Json<UpdateCustomerRequest>,
) -> Result<HttpResponse, AppError> {
    let mut customer = repo
        .find_by_id(&path.into_inner())
        .await?
        .ok_or_else(|| AppError::not_found("Customer"))?;

    customer.apply_update(request.into_inner())?;
    repo.update(&customer).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": customer,
    })))
}

/// DELETE /customers/{id} (owners only).
pub async fn delete_customer(
    repo: web::Data<Arc<CustomerRepository>>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    user.authorize(&[UserRole::Owner])?;

    let deleted = repo.delete(&path.into_inner()).await?;
    if !deleted {
        return Err(AppError::not_found("Customer"));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": {},
    })))
}

/// Configure customer routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/customers")
            .route("/search", web::get().to(search_customers))
            .route("", web::get().to(list_customers))
            .route("", web::post().to(create_customer))
            .route("/{id}", web::get().to(get_customer))
            .route("/{id}", web::put().to(update_customer))
            .route("/{id}", web::delete().to(delete_customer)),
    );
}
