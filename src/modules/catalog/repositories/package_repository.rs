use sqlx::MySqlPool;

use crate::core::{AppError, Result};
use crate::modules::catalog::models::{Package, Service};

/// Repository for package database operations
pub struct PackageRepository {
    pool: MySqlPool,
}

impl PackageRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Create a package and its service memberships in a transaction.
    pub async fn create(&self, package: &Package, service_ids: &[String]) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        sqlx::query(
            r#"
            INSERT INTO packages (
                id, name, description, price, duration, image, is_active, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&package.id)
        .bind(&package.name)
        .bind(&package.description)
        .bind(package.price)
        .bind(package.duration)
        .bind(&package.image)
        .bind(package.is_active)
        .bind(package.created_at)
        .bind(package.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        for service_id in service_ids {
            sqlx::query("INSERT INTO package_services (package_id, service_id) VALUES (?, ?)")
                .bind(&package.id)
                .bind(service_id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
        }

        tx.commit().await.map_err(AppError::Database)?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Package>> {
        let package = sqlx::query_as::<_, Package>("SELECT * FROM packages WHERE id = ? LIMIT 1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        match package {
            Some(mut package) => {
                package.services = self.find_services(&package.id).await?;
                Ok(Some(package))
            }
            None => Ok(None),
        }
    }

    pub async fn list_active(&self) -> Result<Vec<Package>> {
        let mut packages = sqlx::query_as::<_, Package>(
            "SELECT * FROM packages WHERE is_active = TRUE ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        for package in &mut packages {
            package.services = self.find_services(&package.id).await?;
        }

        Ok(packages)
    }

    /// Services joined through `package_services`; services deleted from the
    /// catalog are silently dropped from the result.
    async fn find_services(&self, package_id: &str) -> Result<Vec<Service>> {
        sqlx::query_as::<_, Service>(
            r#"
            SELECT s.*
            FROM package_services ps
            INNER JOIN services s ON s.id = ps.service_id
            WHERE ps.package_id = ?
            ORDER BY s.name ASC
            "#,
        )
        .bind(package_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    /// Update a package; when `service_ids` is provided the membership set
    /// is replaced wholesale.
    pub async fn update(&self, package: &Package, service_ids: Option<&[String]>) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        sqlx::query(
            r#"
            UPDATE packages
            SET name = ?, description = ?, price = ?, duration = ?, image = ?,
                is_active = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&package.name)
        .bind(&package.description)
        .bind(package.price)
        .bind(package.duration)
        .bind(&package.image)
        .bind(package.is_active)
        .bind(package.updated_at)
        .bind(&package.id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        if let Some(service_ids) = service_ids {
            sqlx::query("DELETE FROM package_services WHERE package_id = ?")
                .bind(&package.id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;

            for service_id in service_ids {
                sqlx::query("INSERT INTO package_services (package_id, service_id) VALUES (?, ?)")
                    .bind(&package.id)
                    .bind(service_id)
                    .execute(&mut *tx)
                    .await
                    .map_err(AppError::Database)?;
            }
        }

        tx.commit().await.map_err(AppError::Database)?;

        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        sqlx::query("DELETE FROM package_services WHERE package_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        let result = sqlx::query("DELETE FROM packages WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;

        Ok(result.rows_affected() > 0)
    }
}
