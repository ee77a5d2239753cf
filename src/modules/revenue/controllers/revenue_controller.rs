use std::sync::Arc;

use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::core::AppError;
use crate::middleware::auth::AuthenticatedUser;
use crate::modules::auth::models::UserRole;
use crate::modules::revenue::services::{MonthFilter, RevenueService};

/// Shared window parameters: explicit year, or an explicit date range.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeQuery {
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct TrendsQuery {
    #[serde(default)]
    pub year: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct MonthlyQuery {
    #[serde(default)]
    pub filter: Option<MonthFilter>,
    #[serde(default)]
    pub month: Option<u32>,
    #[serde(default)]
    pub year: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyQuery {
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub days: Option<u64>,
}

fn validate_year(year: Option<i32>) -> Result<(), AppError> {
    if let Some(year) = year {
        if !(2000..=2100).contains(&year) {
            return Err(AppError::validation(
                "Year must be a valid year between 2000 and 2100",
            ));
        }
    }
    Ok(())
}

fn validate_month(month: Option<u32>) -> Result<(), AppError> {
    if let Some(month) = month {
        if !(1..=12).contains(&month) {
            return Err(AppError::validation("Month must be between 1 and 12"));
        }
    }
    Ok(())
}

fn validate_days(days: Option<u64>) -> Result<(), AppError> {
    if let Some(days) = days {
        if !(1..=365).contains(&days) {
            return Err(AppError::validation("Days must be between 1 and 365"));
        }
    }
    Ok(())
}

/// GET /revenue/metrics
pub async fn get_metrics(
    service: web::Data<Arc<RevenueService>>,
    user: AuthenticatedUser,
    query: web::Query<RangeQuery>,
) -> Result<HttpResponse, AppError> {
    user.authorize(&[UserRole::Owner])?;
    validate_year(query.year)?;

    let metrics = service
        .metrics(query.year, query.start_date, query.end_date)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": metrics,
    })))
}

/// GET /revenue/by-staff
pub async fn get_revenue_by_staff(
    service: web::Data<Arc<RevenueService>>,
    user: AuthenticatedUser,
    query: web::Query<RangeQuery>,
) -> Result<HttpResponse, AppError> {
    user.authorize(&[UserRole::Owner])?;
    validate_year(query.year)?;

    let breakdown = service
        .by_staff(query.year, query.start_date, query.end_date)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "count": breakdown.len(),
        "data": breakdown,
    })))
}

/// GET /revenue/by-category
pub async fn get_revenue_by_category(
    service: web::Data<Arc<RevenueService>>,
    user: AuthenticatedUser,
    query: web::Query<RangeQuery>,
) -> Result<HttpResponse, AppError> {
    user.authorize(&[UserRole::Owner])?;
    validate_year(query.year)?;

    let breakdown = service
        .by_category(query.year, query.start_date, query.end_date)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "count": breakdown.len(),
        "data": breakdown,
    })))
}

/// GET /revenue/trends: always exactly 12 months.
pub async fn get_revenue_trends(
    service: web::Data<Arc<RevenueService>>,
    user: AuthenticatedUser,
    query: web::Query<TrendsQuery>,
) -> Result<HttpResponse, AppError> {
    user.authorize(&[UserRole::Owner])?;
    validate_year(query.year)?;

    let (year, trends) = service.trends(query.year).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "year": year,
        "data": trends,
    })))
}

/// GET /revenue/monthly
pub async fn get_monthly_revenue(
    service: web::Data<Arc<RevenueService>>,
    user: AuthenticatedUser,
    query: web::Query<MonthlyQuery>,
) -> Result<HttpResponse, AppError> {
    user.authorize(&[UserRole::Owner])?;
    validate_year(query.year)?;
    validate_month(query.month)?;

    let report = service
        .monthly(query.filter, query.month, query.year)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "period": report.period,
        "summary": report.summary,
        "dailyBreakdown": report.daily_breakdown,
        "byStaff": report.by_staff,
        "byCategory": report.by_category,
    })))
}

/// GET /revenue/daily
pub async fn get_daily_revenue(
    service: web::Data<Arc<RevenueService>>,
    user: AuthenticatedUser,
    query: web::Query<DailyQuery>,
) -> Result<HttpResponse, AppError> {
    user.authorize(&[UserRole::Owner])?;
    validate_days(query.days)?;

    let report = service
        .daily(query.start_date, query.end_date, query.days)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "summary": report.summary,
        "data": report.data,
    })))
}

/// GET /revenue/staff/{staffId}
pub async fn get_staff_revenue(
    service: web::Data<Arc<RevenueService>>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    query: web::Query<RangeQuery>,
) -> Result<HttpResponse, AppError> {
    user.authorize(&[UserRole::Owner])?;
    validate_year(query.year)?;

    let report = service
        .staff_revenue(
            &path.into_inner(),
            query.year,
            query.start_date,
            query.end_date,
        )
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": report,
    })))
}

/// Configure revenue routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/revenue")
            .route("/metrics", web::get().to(get_metrics))
            .route("/by-staff", web::get().to(get_revenue_by_staff))
            .route("/by-category", web::get().to(get_revenue_by_category))
            .route("/trends", web::get().to(get_revenue_trends))
            .route("/monthly", web::get().to(get_monthly_revenue))
            .route("/daily", web::get().to(get_daily_revenue))
            .route("/staff/{staffId}", web::get().to(get_staff_revenue)),
    );
}
