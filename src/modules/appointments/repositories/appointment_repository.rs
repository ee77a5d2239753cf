use chrono::{DateTime, Utc};
use sqlx::MySqlPool;

use crate::core::{AppError, Result};
use crate::modules::appointments::models::{Appointment, AppointmentStatus};
use crate::modules::catalog::models::Service;

/// Repository for the appointment ledger.
///
/// Service attachments live in the `appointment_services` table and are
/// written together with the appointment row in one transaction, so a
/// failed write never leaves a half-attached appointment behind.
pub struct AppointmentRepository {
    pool: MySqlPool,
}

impl AppointmentRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, appointment: &Appointment) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        sqlx::query(
            r#"
            INSERT INTO appointments (
                id, customer_id, staff_id, appointment_date, duration, price,
                status, notes, created_by, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&appointment.id)
        .bind(&appointment.customer_id)
        .bind(&appointment.staff_id)
        .bind(appointment.appointment_date)
        .bind(appointment.duration)
        .bind(appointment.price)
        .bind(appointment.status)
        .bind(&appointment.notes)
        .bind(&appointment.created_by)
        .bind(appointment.created_at)
        .bind(appointment.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        for service_id in &appointment.service_ids {
            sqlx::query(
                "INSERT INTO appointment_services (appointment_id, service_id) VALUES (?, ?)",
            )
            .bind(&appointment.id)
            .bind(service_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        }

        tx.commit().await.map_err(AppError::Database)?;

        Ok(())
    }

    /// Persist an updated appointment. When `replace_services` is set the
    /// attachment set is rewritten from `appointment.service_ids`.
    pub async fn update(&self, appointment: &Appointment, replace_services: bool) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        sqlx::query(
            r#"
            UPDATE appointments
            SET customer_id = ?, staff_id = ?, appointment_date = ?, duration = ?,
                price = ?, status = ?, notes = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&appointment.customer_id)
        .bind(&appointment.staff_id)
        .bind(appointment.appointment_date)
        .bind(appointment.duration)
        .bind(appointment.price)
        .bind(appointment.status)
        .bind(&appointment.notes)
        .bind(appointment.updated_at)
        .bind(&appointment.id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        if replace_services {
            sqlx::query("DELETE FROM appointment_services WHERE appointment_id = ?")
                .bind(&appointment.id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;

            for service_id in &appointment.service_ids {
                sqlx::query(
                    "INSERT INTO appointment_services (appointment_id, service_id) VALUES (?, ?)",
                )
                .bind(&appointment.id)
                .bind(service_id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
            }
        }

        tx.commit().await.map_err(AppError::Database)?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Appointment>> {
        let appointment =
            sqlx::query_as::<_, Appointment>("SELECT * FROM appointments WHERE id = ? LIMIT 1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(AppError::Database)?;

        match appointment {
            Some(mut appointment) => {
                appointment.service_ids = self.find_service_ids(&appointment.id).await?;
                Ok(Some(appointment))
            }
            None => Ok(None),
        }
    }

    /// Full ledger page, newest appointment date first.
    pub async fn list(&self, skip: u64, limit: u32) -> Result<Vec<Appointment>> {
        let mut appointments = sqlx::query_as::<_, Appointment>(
            "SELECT * FROM appointments ORDER BY appointment_date DESC LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        for appointment in &mut appointments {
            appointment.service_ids = self.find_service_ids(&appointment.id).await?;
        }

        Ok(appointments)
    }

    pub async fn count(&self) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM appointments")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    /// Non-cancelled appointments inside a day window, earliest first.
    pub async fn list_in_window(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        skip: u64,
        limit: u32,
    ) -> Result<Vec<Appointment>> {
        let mut appointments = sqlx::query_as::<_, Appointment>(
            r#"
            SELECT * FROM appointments
            WHERE appointment_date BETWEEN ? AND ? AND status <> 'CANCELLED'
            ORDER BY appointment_date ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        for appointment in &mut appointments {
            appointment.service_ids = self.find_service_ids(&appointment.id).await?;
        }

        Ok(appointments)
    }

    pub async fn count_in_window(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM appointments
            WHERE appointment_date BETWEEN ? AND ? AND status <> 'CANCELLED'
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    pub async fn update_status(&self, id: &str, status: AppointmentStatus) -> Result<()> {
        sqlx::query(
            "UPDATE appointments SET status = ?, updated_at = UTC_TIMESTAMP() WHERE id = ?",
        )
        .bind(status)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(())
    }

    /// Attached services, resolved for presentation. Services deleted from
    /// the catalog since booking are dropped rather than erroring.
    pub async fn find_services(&self, appointment_id: &str) -> Result<Vec<Service>> {
        sqlx::query_as::<_, Service>(
            r#"
            SELECT s.*
            FROM appointment_services aps
            INNER JOIN services s ON s.id = aps.service_id
            WHERE aps.appointment_id = ?
            ORDER BY s.name ASC
            "#,
        )
        .bind(appointment_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_service_ids(&self, appointment_id: &str) -> Result<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            "SELECT service_id FROM appointment_services WHERE appointment_id = ?",
        )
        .bind(appointment_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
