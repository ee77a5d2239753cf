use sqlx::MySqlPool;

use crate::core::{AppError, Result};
use crate::modules::customers::models::Customer;

/// Repository for customer database operations
pub struct CustomerRepository {
    pool: MySqlPool,
}

impl CustomerRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, customer: &Customer) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO customers (
                id, name, email, phone_number, address, notes,
                total_appointments, total_spent, last_visit, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&customer.id)
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone_number)
        .bind(&customer.address)
        .bind(&customer.notes)
        .bind(customer.total_appointments)
        .bind(customer.total_spent)
        .bind(customer.last_visit)
        .bind(customer.created_at)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "A customer with this phone number or email already exists"))?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Customer>> {
        sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = ? LIMIT 1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    pub async fn list(&self, skip: u64, limit: u32) -> Result<Vec<Customer>> {
        sqlx::query_as::<_, Customer>(
            "SELECT * FROM customers ORDER BY created_at DESC LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    pub async fn count(&self) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    /// Substring search over name, email and phone number.
    pub async fn search(&self, term: &str) -> Result<Vec<Customer>> {
        let pattern = format!("%{}%", term);

        sqlx::query_as::<_, Customer>(
            r#"
            SELECT * FROM customers
            WHERE name LIKE ? OR email LIKE ? OR phone_number LIKE ?
            ORDER BY name ASC
            "#,
        )
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    pub async fn update(&self, customer: &Customer) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE customers
            SET name = ?, email = ?, phone_number = ?, address = ?, notes = ?,
                total_appointments = ?, total_spent = ?, last_visit = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone_number)
        .bind(&customer.address)
        .bind(&customer.notes)
        .bind(customer.total_appointments)
        .bind(customer.total_spent)
        .bind(customer.last_visit)
        .bind(customer.updated_at)
        .bind(&customer.id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "A customer with this phone number or email already exists"))?;

        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM customers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_unique_violation(error: sqlx::Error, message: &str) -> AppError {
    if let Some(db_err) = error.as_database_error() {
        if db_err.is_unique_violation() {
            return AppError::validation(message);
        }
    }
    AppError::Database(error)
}
