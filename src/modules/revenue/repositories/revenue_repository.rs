use chrono::{DateTime, Utc};
use sqlx::MySqlPool;

use crate::core::{AppError, Result};
use crate::modules::revenue::models::{
    CategoryGroupRow, CompletedSale, DailyBucket, MetricsRow, MonthBucket, ServiceSale,
    StaffGroupRow, StaffTotalsRow,
};

/// Aggregation queries over the completed-appointment ledger.
///
/// Every query filters on `status = 'COMPLETED'` plus a closed date window.
/// Grouping joins are deliberately asymmetric: the by-staff and by-category
/// groupings INNER JOIN the referenced table (rows whose referent was
/// deleted drop out at the database), while `completed_sales` LEFT JOINs so
/// the in-process monthly rollup can apply its own skip policy.
pub struct RevenueRepository {
    pool: MySqlPool,
}

impl RevenueRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn metrics(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<MetricsRow> {
        sqlx::query_as::<_, MetricsRow>(
            r#"
            SELECT COALESCE(SUM(a.price), 0) AS total_revenue,
                   COUNT(*) AS total_appointments,
                   COUNT(DISTINCT c.id) AS total_customers
            FROM appointments a
            LEFT JOIN customers c ON c.id = a.customer_id
            WHERE a.status = 'COMPLETED' AND a.appointment_date BETWEEN ? AND ?
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    pub async fn revenue_by_staff(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<StaffGroupRow>> {
        sqlx::query_as::<_, StaffGroupRow>(
            r#"
            SELECT a.staff_id,
                   s.name AS staff_name,
                   s.phone_number AS staff_phone_number,
                   SUM(a.price) AS total_revenue,
                   COUNT(*) AS appointment_count
            FROM appointments a
            INNER JOIN staff_members s ON s.id = a.staff_id
            WHERE a.status = 'COMPLETED' AND a.appointment_date BETWEEN ? AND ?
            GROUP BY a.staff_id, s.name, s.phone_number
            ORDER BY total_revenue DESC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    /// Revenue per service category, summing each sold service's own price.
    pub async fn revenue_by_category(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CategoryGroupRow>> {
        sqlx::query_as::<_, CategoryGroupRow>(
            r#"
            SELECT s.category,
                   SUM(s.price) AS total_revenue,
                   COUNT(*) AS service_count
            FROM appointments a
            INNER JOIN appointment_services aps ON aps.appointment_id = a.id
            INNER JOIN services s ON s.id = aps.service_id
            WHERE a.status = 'COMPLETED' AND a.appointment_date BETWEEN ? AND ?
            GROUP BY s.category
            ORDER BY total_revenue DESC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    /// Months that had at least one completed appointment; the trends
    /// rollup fills the gaps to a fixed 12 buckets.
    pub async fn month_buckets(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<MonthBucket>> {
        sqlx::query_as::<_, MonthBucket>(
            r#"
            SELECT CAST(MONTH(a.appointment_date) AS SIGNED) AS month_number,
                   SUM(a.price) AS revenue,
                   COUNT(*) AS appointment_count
            FROM appointments a
            WHERE a.status = 'COMPLETED' AND a.appointment_date BETWEEN ? AND ?
            GROUP BY month_number
            ORDER BY month_number ASC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    pub async fn daily_buckets(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<DailyBucket>> {
        sqlx::query_as::<_, DailyBucket>(
            r#"
            SELECT DATE(a.appointment_date) AS day,
                   SUM(a.price) AS revenue,
                   COUNT(*) AS appointment_count
            FROM appointments a
            WHERE a.status = 'COMPLETED' AND a.appointment_date BETWEEN ? AND ?
            GROUP BY day
            ORDER BY day ASC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    /// Completed appointments with references left-joined for the monthly
    /// rollup's skip-on-missing policy.
    pub async fn completed_sales(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CompletedSale>> {
        sqlx::query_as::<_, CompletedSale>(
            r#"
            SELECT a.id AS appointment_id,
                   a.price,
                   a.appointment_date,
                   c.id AS customer_id,
                   st.id AS staff_id,
                   st.name AS staff_name
            FROM appointments a
            LEFT JOIN customers c ON c.id = a.customer_id
            LEFT JOIN staff_members st ON st.id = a.staff_id
            WHERE a.status = 'COMPLETED' AND a.appointment_date BETWEEN ? AND ?
            ORDER BY a.appointment_date ASC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    /// Every service sold inside the window, one row per attachment.
    pub async fn service_sales(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ServiceSale>> {
        sqlx::query_as::<_, ServiceSale>(
            r#"
            SELECT aps.appointment_id,
                   s.category,
                   s.price
            FROM appointments a
            INNER JOIN appointment_services aps ON aps.appointment_id = a.id
            INNER JOIN services s ON s.id = aps.service_id
            WHERE a.status = 'COMPLETED' AND a.appointment_date BETWEEN ? AND ?
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    pub async fn staff_totals(
        &self,
        staff_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<StaffTotalsRow> {
        sqlx::query_as::<_, StaffTotalsRow>(
            r#"
            SELECT COALESCE(SUM(a.price), 0) AS total_revenue,
                   COUNT(*) AS appointment_count
            FROM appointments a
            WHERE a.staff_id = ? AND a.status = 'COMPLETED'
              AND a.appointment_date BETWEEN ? AND ?
            "#,
        )
        .bind(staff_id)
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
