use sqlx::MySqlPool;

use crate::core::{AppError, Result};
use crate::modules::catalog::models::{Service, ServiceCategory};

/// Repository for catalog service database operations
pub struct ServiceRepository {
    pool: MySqlPool,
}

impl ServiceRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, service: &Service) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO services (
                id, name, description, category, duration, price,
                is_popular, is_active, icon, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&service.id)
        .bind(&service.name)
        .bind(&service.description)
        .bind(service.category)
        .bind(service.duration)
        .bind(service.price)
        .bind(service.is_popular)
        .bind(service.is_active)
        .bind(&service.icon)
        .bind(service.created_at)
        .bind(service.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::validation("A service with this name already exists");
                }
            }
            AppError::Database(e)
        })?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Service>> {
        sqlx::query_as::<_, Service>("SELECT * FROM services WHERE id = ? LIMIT 1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    /// Fetch every service whose id is in `ids`. Unknown ids are simply
    /// absent from the result; callers compare lengths to detect them.
    pub async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Service>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!("SELECT * FROM services WHERE id IN ({})", placeholders);

        let mut query = sqlx::query_as::<_, Service>(&sql);
        for id in ids {
            query = query.bind(id);
        }

        query.fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    pub async fn list_active(&self) -> Result<Vec<Service>> {
        sqlx::query_as::<_, Service>(
            "SELECT * FROM services WHERE is_active = TRUE ORDER BY category ASC, name ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    pub async fn list_by_category(&self, category: ServiceCategory) -> Result<Vec<Service>> {
        sqlx::query_as::<_, Service>(
            "SELECT * FROM services WHERE category = ? AND is_active = TRUE ORDER BY name ASC",
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    pub async fn update(&self, service: &Service) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE services
            SET name = ?, description = ?, category = ?, duration = ?, price = ?,
                is_popular = ?, is_active = ?, icon = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&service.name)
        .bind(&service.description)
        .bind(service.category)
        .bind(service.duration)
        .bind(service.price)
        .bind(service.is_popular)
        .bind(service.is_active)
        .bind(&service.icon)
        .bind(service.updated_at)
        .bind(&service.id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::validation("A service with this name already exists");
                }
            }
            AppError::Database(e)
        })?;

        Ok(())
    }

    /// Soft delete: the service stays readable for historical appointments.
    pub async fn deactivate(&self, id: &str) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE services SET is_active = FALSE, updated_at = UTC_TIMESTAMP() WHERE id = ?",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result.rows_affected() > 0)
    }
}
