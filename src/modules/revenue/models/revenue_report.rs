use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use crate::modules::catalog::models::ServiceCategory;

// ---------------------------------------------------------------------------
// Aggregation rows fetched from the ledger
// ---------------------------------------------------------------------------

/// One completed appointment with its references left-joined; a reference
/// that no longer resolves yields `None` instead of failing the report.
#[derive(Debug, Clone, FromRow)]
pub struct CompletedSale {
    pub appointment_id: String,
    pub price: Decimal,
    pub appointment_date: DateTime<Utc>,
    pub customer_id: Option<String>,
    pub staff_id: Option<String>,
    pub staff_name: Option<String>,
}

/// One service sold as part of a completed appointment. Services deleted
/// from the catalog are already dropped by the join that produces these.
#[derive(Debug, Clone, FromRow)]
pub struct ServiceSale {
    pub appointment_id: String,
    pub category: ServiceCategory,
    pub price: Decimal,
}

/// SQL-grouped month bucket; months with no completed appointments are
/// absent and get filled in by the trends rollup.
#[derive(Debug, Clone, FromRow)]
pub struct MonthBucket {
    pub month_number: i32,
    pub revenue: Decimal,
    pub appointment_count: i64,
}

/// SQL-grouped calendar-day bucket.
#[derive(Debug, Clone, FromRow)]
pub struct DailyBucket {
    pub day: NaiveDate,
    pub revenue: Decimal,
    pub appointment_count: i64,
}

#[derive(Debug, Clone, FromRow)]
pub struct MetricsRow {
    pub total_revenue: Decimal,
    pub total_appointments: i64,
    pub total_customers: i64,
}

#[derive(Debug, Clone, FromRow)]
pub struct StaffGroupRow {
    pub staff_id: String,
    pub staff_name: String,
    pub staff_phone_number: String,
    pub total_revenue: Decimal,
    pub appointment_count: i64,
}

#[derive(Debug, Clone, FromRow)]
pub struct CategoryGroupRow {
    pub category: ServiceCategory,
    pub total_revenue: Decimal,
    pub service_count: i64,
}

#[derive(Debug, Clone, FromRow)]
pub struct StaffTotalsRow {
    pub total_revenue: Decimal,
    pub appointment_count: i64,
}

// ---------------------------------------------------------------------------
// Report payloads
// ---------------------------------------------------------------------------

/// Headline metrics over a window of completed appointments.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueMetrics {
    pub total_revenue: Decimal,
    pub total_appointments: i64,
    pub avg_transaction: Decimal,
    pub total_customers: i64,
}

/// Per-staff revenue group, descending by revenue.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffRevenue {
    pub staff_id: String,
    pub staff_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff_phone_number: Option<String>,
    pub total_revenue: Decimal,
    pub appointment_count: i64,
    pub avg_revenue: Decimal,
}

/// Per-category revenue group, descending by revenue.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRevenue {
    pub category: ServiceCategory,
    pub total_revenue: Decimal,
    pub service_count: i64,
}

/// One month of the fixed 12-bucket yearly trend.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthTrend {
    pub month: &'static str,
    pub month_number: u32,
    pub revenue: Decimal,
    pub appointment_count: i64,
}

/// One day with at least one completed appointment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub revenue: Decimal,
    pub appointment_count: i64,
}

/// Summary over the daily breakdown. The average is per day that actually
/// had revenue, not per calendar day of the window.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub total_revenue: Decimal,
    pub total_appointments: i64,
    pub avg_daily_revenue: Decimal,
    pub days_with_revenue: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReport {
    pub summary: DailySummary,
    pub data: Vec<DailyRevenue>,
}

/// Calendar-month label for the monthly report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPeriod {
    pub month: &'static str,
    pub month_number: u32,
    pub year: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub total_revenue: Decimal,
    pub total_appointments: i64,
    pub unique_customers: i64,
    pub avg_revenue_per_day: Decimal,
    pub avg_revenue_per_appointment: Decimal,
}

/// Per-day line of the monthly breakdown.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayBreakdown {
    pub day: u32,
    pub date: NaiveDate,
    pub revenue: Decimal,
    pub appointment_count: i64,
}

/// Single-month report with nested per-staff and per-category breakdowns.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub period: MonthlyPeriod,
    pub summary: MonthlySummary,
    pub daily_breakdown: Vec<DayBreakdown>,
    pub by_staff: Vec<StaffRevenue>,
    pub by_category: Vec<CategoryRevenue>,
}

/// Window summary for a single staff member; zero-valued when the staff
/// member had no completed appointments in the window.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffRevenueReport {
    pub staff_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff_phone_number: Option<String>,
    pub total_revenue: Decimal,
    pub appointment_count: i64,
    pub avg_revenue: Decimal,
}

pub const MONTH_NAMES_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub const MONTH_NAMES_LONG: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];
