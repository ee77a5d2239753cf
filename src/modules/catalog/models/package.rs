use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::catalog::models::Service;

/// A bundled offering of several services at a package price. Packages are
/// an independent catalog entity; appointments reference raw services only.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    /// Minutes
    pub duration: i32,
    pub image: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Resolved services, joined from the `package_services` table.
    #[sqlx(skip)]
    pub services: Vec<Service>,
}

impl Package {
    pub fn new(request: &CreatePackageRequest) -> Result<Self> {
        validate_name(&request.name)?;
        validate_price(request.price)?;
        validate_duration(request.duration)?;
        if request.service_ids.is_empty() {
            return Err(AppError::validation(
                "A package must include at least one service",
            ));
        }

        let now = Utc::now();

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: request.name.trim().to_string(),
            description: normalize_optional(request.description.clone()),
            price: request.price,
            duration: request.duration,
            image: normalize_optional(request.image.clone()),
            is_active: true,
            created_at: now,
            updated_at: now,
            services: Vec::new(),
        })
    }

    /// Apply a partial update: only fields present in the request change.
    /// Service membership changes are handled by the repository.
    pub fn apply_update(&mut self, request: &UpdatePackageRequest) -> Result<()> {
        if let Some(ref name) = request.name {
            validate_name(name)?;
            self.name = name.trim().to_string();
        }
        if let Some(ref description) = request.description {
            self.description = normalize_optional(Some(description.clone()));
        }
        if let Some(price) = request.price {
            validate_price(price)?;
            self.price = price;
        }
        if let Some(duration) = request.duration {
            validate_duration(duration)?;
            self.duration = duration;
        }
        if let Some(ref image) = request.image {
            self.image = normalize_optional(Some(image.clone()));
        }
        if let Some(is_active) = request.is_active {
            self.is_active = is_active;
        }
        self.updated_at = Utc::now();

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePackageRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub service_ids: Vec<String>,
    pub price: Decimal,
    pub duration: i32,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePackageRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub service_ids: Option<Vec<String>>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub duration: Option<i32>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

fn validate_name(name: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.len() < 2 {
        return Err(AppError::validation("Name must be at least 2 characters"));
    }
    if trimmed.len() > 100 {
        return Err(AppError::validation("Name cannot exceed 100 characters"));
    }
    Ok(())
}

fn validate_price(price: Decimal) -> Result<()> {
    if price < Decimal::ZERO {
        return Err(AppError::validation("Price must be a positive number"));
    }
    Ok(())
}

fn validate_duration(duration: i32) -> Result<()> {
    if duration < 15 {
        return Err(AppError::validation("Duration must be at least 15 minutes"));
    }
    Ok(())
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_package_requires_services() {
        let request = CreatePackageRequest {
            name: "Bridal Glow".to_string(),
            description: None,
            service_ids: vec![],
            price: dec!(250),
            duration: 180,
            image: None,
        };
        assert!(Package::new(&request).is_err());
    }

    #[test]
    fn test_new_package() {
        let request = CreatePackageRequest {
            name: "Bridal Glow".to_string(),
            description: Some("".to_string()),
            service_ids: vec!["s1".to_string()],
            price: dec!(250),
            duration: 180,
            image: None,
        };
        let package = Package::new(&request).unwrap();
        assert!(package.is_active);
        assert_eq!(package.description, None);
    }
}
