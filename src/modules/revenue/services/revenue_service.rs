use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::info;

use crate::core::Result;
use crate::modules::revenue::models::{
    CategoryRevenue, CompletedSale, DailyBucket, DailyReport, DailyRevenue, DailySummary,
    DayBreakdown, MonthBucket, MonthTrend, MonthlyPeriod, MonthlyReport, MonthlySummary,
    RevenueMetrics, ServiceSale, StaffRevenue, StaffRevenueReport, MONTH_NAMES_LONG,
    MONTH_NAMES_SHORT,
};
use crate::modules::revenue::repositories::RevenueRepository;
use crate::modules::revenue::services::report_window::{MonthFilter, ReportWindow};
use crate::modules::staff::repositories::StaffRepository;

/// Derives the revenue reports from the completed-appointment ledger.
pub struct RevenueService {
    revenue: Arc<RevenueRepository>,
    staff: Arc<StaffRepository>,
}

impl RevenueService {
    pub fn new(revenue: Arc<RevenueRepository>, staff: Arc<StaffRepository>) -> Self {
        Self { revenue, staff }
    }

    /// Headline metrics for the resolved window.
    pub async fn metrics(
        &self,
        year: Option<i32>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<RevenueMetrics> {
        let window = ReportWindow::resolve(year, start_date, end_date, Utc::now())?;
        let row = self.revenue.metrics(window.start, window.end).await?;

        Ok(RevenueMetrics {
            total_revenue: row.total_revenue,
            total_appointments: row.total_appointments,
            avg_transaction: average(row.total_revenue, row.total_appointments),
            total_customers: row.total_customers,
        })
    }

    /// Per-staff totals, descending by revenue. Staff deleted since their
    /// appointments completed drop out of this grouping at the join.
    pub async fn by_staff(
        &self,
        year: Option<i32>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<StaffRevenue>> {
        let window = ReportWindow::resolve(year, start_date, end_date, Utc::now())?;
        let rows = self.revenue.revenue_by_staff(window.start, window.end).await?;

        Ok(rows
            .into_iter()
            .map(|row| StaffRevenue {
                avg_revenue: average(row.total_revenue, row.appointment_count),
                staff_id: row.staff_id,
                staff_name: row.staff_name,
                staff_phone_number: Some(row.staff_phone_number),
                total_revenue: row.total_revenue,
                appointment_count: row.appointment_count,
            })
            .collect())
    }

    /// Per-category totals over every service sold in the window.
    pub async fn by_category(
        &self,
        year: Option<i32>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<CategoryRevenue>> {
        let window = ReportWindow::resolve(year, start_date, end_date, Utc::now())?;
        let rows = self
            .revenue
            .revenue_by_category(window.start, window.end)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| CategoryRevenue {
                category: row.category,
                total_revenue: row.total_revenue,
                service_count: row.service_count,
            })
            .collect())
    }

    /// Fixed 12-bucket monthly breakdown for a year.
    pub async fn trends(&self, year: Option<i32>) -> Result<(i32, Vec<MonthTrend>)> {
        let target_year = year.unwrap_or_else(|| Utc::now().year());
        let window = ReportWindow::calendar_year(target_year)?;

        let buckets = self.revenue.month_buckets(window.start, window.end).await?;

        Ok((target_year, fill_trend_months(&buckets)))
    }

    /// Daily breakdown over an explicit range or a trailing-days window
    /// (default 30 days).
    pub async fn daily(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        days: Option<u64>,
    ) -> Result<DailyReport> {
        let window = match (start_date, end_date) {
            (Some(start), Some(end)) => ReportWindow::date_range(start, end),
            _ => ReportWindow::trailing_days(days.unwrap_or(30), Utc::now()),
        };

        let buckets = self.revenue.daily_buckets(window.start, window.end).await?;

        Ok(DailyReport {
            summary: summarize_daily(&buckets),
            data: buckets
                .into_iter()
                .map(|b| DailyRevenue {
                    date: b.day,
                    revenue: b.revenue,
                    appointment_count: b.appointment_count,
                })
                .collect(),
        })
    }

    /// Single-month report with nested per-staff and per-category
    /// breakdowns. Unlike the dedicated groupings above, the nested
    /// breakdowns are reduced in process and skip rows whose reference no
    /// longer resolves.
    pub async fn monthly(
        &self,
        filter: Option<MonthFilter>,
        month: Option<u32>,
        year: Option<i32>,
    ) -> Result<MonthlyReport> {
        let month_window = ReportWindow::calendar_month(filter, month, year, Utc::now())?;
        let window = month_window.window;

        let sales = self.revenue.completed_sales(window.start, window.end).await?;
        let service_sales = self.revenue.service_sales(window.start, window.end).await?;

        let daily_breakdown = rollup_daily_breakdown(&sales);
        let total_revenue: Decimal = sales.iter().map(|s| s.price).sum();

        let summary = MonthlySummary {
            total_revenue,
            total_appointments: sales.len() as i64,
            unique_customers: count_unique_customers(&sales),
            avg_revenue_per_day: average(total_revenue, daily_breakdown.len() as i64),
            avg_revenue_per_appointment: average(total_revenue, sales.len() as i64),
        };

        info!(
            year = month_window.year,
            month = month_window.month,
            appointments = sales.len(),
            "Monthly revenue report generated"
        );

        Ok(MonthlyReport {
            period: MonthlyPeriod {
                month: MONTH_NAMES_LONG[(month_window.month - 1) as usize],
                month_number: month_window.month,
                year: month_window.year,
                start_date: window.start_date(),
                end_date: window.end_date(),
            },
            summary,
            daily_breakdown,
            by_staff: rollup_by_staff(&sales),
            by_category: rollup_by_category(&service_sales),
        })
    }

    /// Window summary for a single staff member. A staff member with no
    /// completed appointments gets a zero-valued summary, not an error.
    pub async fn staff_revenue(
        &self,
        staff_id: &str,
        year: Option<i32>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<StaffRevenueReport> {
        let window = ReportWindow::resolve(year, start_date, end_date, Utc::now())?;
        let totals = self
            .revenue
            .staff_totals(staff_id, window.start, window.end)
            .await?;

        if totals.appointment_count == 0 {
            return Ok(StaffRevenueReport {
                staff_id: staff_id.to_string(),
                staff_name: None,
                staff_phone_number: None,
                total_revenue: Decimal::ZERO,
                appointment_count: 0,
                avg_revenue: Decimal::ZERO,
            });
        }

        // The staff record may have been deleted since; the summary still
        // reports the historical totals.
        let staff = self.staff.find_by_id(staff_id).await?;

        Ok(StaffRevenueReport {
            staff_id: staff_id.to_string(),
            staff_name: staff.as_ref().map(|s| s.name.clone()),
            staff_phone_number: staff.as_ref().map(|s| s.phone_number.clone()),
            total_revenue: totals.total_revenue,
            appointment_count: totals.appointment_count,
            avg_revenue: average(totals.total_revenue, totals.appointment_count),
        })
    }
}

/// `total / count` rounded to cents; zero when the group is empty.
pub fn average(total: Decimal, count: i64) -> Decimal {
    if count <= 0 {
        return Decimal::ZERO;
    }
    (total / Decimal::from(count)).round_dp(2)
}

/// Expand sparse month buckets to exactly 12 entries, one per month, with
/// zeroes where nothing completed.
pub fn fill_trend_months(buckets: &[MonthBucket]) -> Vec<MonthTrend> {
    MONTH_NAMES_SHORT
        .iter()
        .copied()
        .enumerate()
        .map(|(index, name)| {
            let month_number = (index + 1) as u32;
            let bucket = buckets
                .iter()
                .find(|b| b.month_number == month_number as i32);

            MonthTrend {
                month: name,
                month_number,
                revenue: bucket.map(|b| b.revenue).unwrap_or(Decimal::ZERO),
                appointment_count: bucket.map(|b| b.appointment_count).unwrap_or(0),
            }
        })
        .collect()
}

/// Summarize daily buckets. Only days with revenue exist in `buckets`, so
/// the average is per day-with-revenue rather than per calendar day.
pub fn summarize_daily(buckets: &[DailyBucket]) -> DailySummary {
    let total_revenue: Decimal = buckets.iter().map(|b| b.revenue).sum();
    let total_appointments: i64 = buckets.iter().map(|b| b.appointment_count).sum();

    DailySummary {
        total_revenue,
        total_appointments,
        avg_daily_revenue: average(total_revenue, buckets.len() as i64),
        days_with_revenue: buckets.len() as i64,
    }
}

/// Customers counted once each; sales whose customer was deleted are left
/// out of the distinct count entirely.
pub fn count_unique_customers(sales: &[CompletedSale]) -> i64 {
    sales
        .iter()
        .filter_map(|s| s.customer_id.as_deref())
        .collect::<HashSet<_>>()
        .len() as i64
}

/// Group sales by staff member, skipping sales whose staff reference no
/// longer resolves; descending by revenue.
pub fn rollup_by_staff(sales: &[CompletedSale]) -> Vec<StaffRevenue> {
    let mut groups: HashMap<&str, (String, Decimal, i64)> = HashMap::new();

    for sale in sales {
        let (Some(staff_id), Some(staff_name)) = (&sale.staff_id, &sale.staff_name) else {
            continue;
        };
        let entry = groups
            .entry(staff_id)
            .or_insert_with(|| (staff_name.clone(), Decimal::ZERO, 0));
        entry.1 += sale.price;
        entry.2 += 1;
    }

    let mut result: Vec<StaffRevenue> = groups
        .into_iter()
        .map(|(staff_id, (staff_name, total_revenue, appointment_count))| StaffRevenue {
            staff_id: staff_id.to_string(),
            staff_name,
            staff_phone_number: None,
            total_revenue,
            appointment_count,
            avg_revenue: average(total_revenue, appointment_count),
        })
        .collect();

    result.sort_by(|a, b| b.total_revenue.cmp(&a.total_revenue));
    result
}

/// Group sold services by category; descending by revenue. Services deleted
/// from the catalog never reach this rollup.
pub fn rollup_by_category(service_sales: &[ServiceSale]) -> Vec<CategoryRevenue> {
    let mut groups: HashMap<_, (Decimal, i64)> = HashMap::new();

    for sale in service_sales {
        let entry = groups.entry(sale.category).or_insert((Decimal::ZERO, 0));
        entry.0 += sale.price;
        entry.1 += 1;
    }

    let mut result: Vec<CategoryRevenue> = groups
        .into_iter()
        .map(|(category, (total_revenue, service_count))| CategoryRevenue {
            category,
            total_revenue,
            service_count,
        })
        .collect();

    result.sort_by(|a, b| b.total_revenue.cmp(&a.total_revenue));
    result
}

/// Group sales by day of month, ascending.
pub fn rollup_daily_breakdown(sales: &[CompletedSale]) -> Vec<DayBreakdown> {
    let mut groups: HashMap<u32, (NaiveDate, Decimal, i64)> = HashMap::new();

    for sale in sales {
        let day = sale.appointment_date.day();
        let entry = groups
            .entry(day)
            .or_insert((sale.appointment_date.date_naive(), Decimal::ZERO, 0));
        entry.1 += sale.price;
        entry.2 += 1;
    }

    let mut result: Vec<DayBreakdown> = groups
        .into_iter()
        .map(|(day, (date, revenue, appointment_count))| DayBreakdown {
            day,
            date,
            revenue,
            appointment_count,
        })
        .collect();

    result.sort_by_key(|d| d.day);
    result
}
