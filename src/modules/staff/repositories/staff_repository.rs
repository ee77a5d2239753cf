use sqlx::MySqlPool;

use crate::core::{AppError, Result};
use crate::modules::staff::models::StaffMember;

/// Repository for staff member database operations
pub struct StaffRepository {
    pool: MySqlPool,
}

impl StaffRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, staff: &StaffMember) -> Result<()> {
        sqlx::query(
            "INSERT INTO staff_members (id, name, phone_number, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&staff.id)
        .bind(&staff.name)
        .bind(&staff.phone_number)
        .bind(staff.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::validation(
                        "A staff member with this phone number already exists",
                    );
                }
            }
            AppError::Database(e)
        })?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<StaffMember>> {
        sqlx::query_as::<_, StaffMember>("SELECT * FROM staff_members WHERE id = ? LIMIT 1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    pub async fn list(&self) -> Result<Vec<StaffMember>> {
        sqlx::query_as::<_, StaffMember>(
            "SELECT * FROM staff_members ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    pub async fn recent(&self, limit: u32) -> Result<Vec<StaffMember>> {
        sqlx::query_as::<_, StaffMember>(
            "SELECT * FROM staff_members ORDER BY created_at DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    pub async fn count(&self) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM staff_members")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    pub async fn update(&self, staff: &StaffMember) -> Result<()> {
        sqlx::query("UPDATE staff_members SET name = ?, phone_number = ? WHERE id = ?")
            .bind(&staff.name)
            .bind(&staff.phone_number)
            .bind(&staff.id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation() {
                        return AppError::validation(
                            "A staff member with this phone number already exists",
                        );
                    }
                }
                AppError::Database(e)
            })?;

        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM staff_members WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result.rows_affected() > 0)
    }
}
