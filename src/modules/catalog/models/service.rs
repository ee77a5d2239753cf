use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::{AppError, Result};

pub const MIN_SERVICE_DURATION_MINUTES: i32 = 15;
pub const MAX_SERVICE_DURATION_MINUTES: i32 = 300;

/// Fixed set of service categories offered by the salon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR(20)", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceCategory {
    HairStyling,
    HairColoring,
    Facial,
    Massage,
    BodyTreatment,
    NailCare,
    HairRemoval,
    Makeup,
    Skincare,
    Other,
}

impl std::fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ServiceCategory::HairStyling => "HAIR_STYLING",
            ServiceCategory::HairColoring => "HAIR_COLORING",
            ServiceCategory::Facial => "FACIAL",
            ServiceCategory::Massage => "MASSAGE",
            ServiceCategory::BodyTreatment => "BODY_TREATMENT",
            ServiceCategory::NailCare => "NAIL_CARE",
            ServiceCategory::HairRemoval => "HAIR_REMOVAL",
            ServiceCategory::Makeup => "MAKEUP",
            ServiceCategory::Skincare => "SKINCARE",
            ServiceCategory::Other => "OTHER",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for ServiceCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "HAIR_STYLING" => Ok(ServiceCategory::HairStyling),
            "HAIR_COLORING" => Ok(ServiceCategory::HairColoring),
            "FACIAL" => Ok(ServiceCategory::Facial),
            "MASSAGE" => Ok(ServiceCategory::Massage),
            "BODY_TREATMENT" => Ok(ServiceCategory::BodyTreatment),
            "NAIL_CARE" => Ok(ServiceCategory::NailCare),
            "HAIR_REMOVAL" => Ok(ServiceCategory::HairRemoval),
            "MAKEUP" => Ok(ServiceCategory::Makeup),
            "SKINCARE" => Ok(ServiceCategory::Skincare),
            "OTHER" => Ok(ServiceCategory::Other),
            _ => Err(format!("Invalid service category: {}", s)),
        }
    }
}

/// A catalog service. Withdrawn from sale via `is_active = false`, never
/// hard-deleted once an appointment has referenced it.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub category: ServiceCategory,
    /// Minutes
    pub duration: i32,
    pub price: Decimal,
    pub is_popular: bool,
    pub is_active: bool,
    pub icon: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Service {
    pub fn new(request: CreateServiceRequest) -> Result<Self> {
        validate_name(&request.name)?;
        validate_duration(request.duration)?;
        validate_price(request.price)?;

        let now = Utc::now();

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: request.name.trim().to_string(),
            description: normalize_optional(request.description),
            category: request.category,
            duration: request.duration,
            price: request.price,
            is_popular: request.is_popular.unwrap_or(false),
            is_active: true,
            icon: request.icon.unwrap_or_else(|| "💆".to_string()),
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a partial update: only fields present in the request change.
    pub fn apply_update(&mut self, request: UpdateServiceRequest) -> Result<()> {
        if let Some(name) = request.name {
            validate_name(&name)?;
            self.name = name.trim().to_string();
        }
        if let Some(description) = request.description {
            self.description = normalize_optional(Some(description));
        }
        if let Some(category) = request.category {
            self.category = category;
        }
        if let Some(duration) = request.duration {
            validate_duration(duration)?;
            self.duration = duration;
        }
        if let Some(price) = request.price {
            validate_price(price)?;
            self.price = price;
        }
        if let Some(is_popular) = request.is_popular {
            self.is_popular = is_popular;
        }
        if let Some(is_active) = request.is_active {
            self.is_active = is_active;
        }
        if let Some(icon) = request.icon {
            self.icon = icon;
        }
        self.updated_at = Utc::now();

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: ServiceCategory,
    pub duration: i32,
    pub price: Decimal,
    #[serde(default)]
    pub is_popular: Option<bool>,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<ServiceCategory>,
    #[serde(default)]
    pub duration: Option<i32>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub is_popular: Option<bool>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub icon: Option<String>,
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

fn validate_duration(duration: i32) -> Result<()> {
    if duration < MIN_SERVICE_DURATION_MINUTES {
        return Err(AppError::validation("Duration must be at least 15 minutes"));
    }
    if duration > MAX_SERVICE_DURATION_MINUTES {
        return Err(AppError::validation("Duration cannot exceed 300 minutes"));
    }
    Ok(())
}

fn validate_price(price: Decimal) -> Result<()> {
    if price < Decimal::ZERO {
        return Err(AppError::validation("Price must be a positive number"));
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

    fn create_request() -> CreateServiceRequest {
        CreateServiceRequest {
            name: "Hot Stone Massage".to_string(),
            description: None,
            category: ServiceCategory::Massage,
            duration: 60,
            price: dec!(75),
            is_popular: None,
            icon: None,
        }
    }

    #[test]
    fn test_new_service_defaults() {
        let service = Service::new(create_request()).unwrap();
        assert!(service.is_active);
        assert!(!service.is_popular);
        assert_eq!(service.icon, "💆");
    }

    #[test]
    fn test_duration_bounds() {
        let mut request = create_request();
        request.duration = 10;
        assert!(Service::new(request).is_err());

        let mut request = create_request();
        request.duration = 301;
        assert!(Service::new(request).is_err());
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut request = create_request();
        request.price = dec!(-1);
        assert!(Service::new(request).is_err());
    }

    #[test]
    fn test_deactivate_via_update() {
        let mut service = Service::new(create_request()).unwrap();
        service
            .apply_update(UpdateServiceRequest {
                is_active: Some(false),
                ..Default::default()
            })
            .unwrap();
        assert!(!service.is_active);
        assert_eq!(service.duration, 60);
    }

    #[test]
    fn test_category_round_trip() {
        use std::str::FromStr;
        for category in [
            "HAIR_STYLING",
            "HAIR_COLORING",
            "FACIAL",
            "MASSAGE",
            "BODY_TREATMENT",
            "NAIL_CARE",
            "HAIR_REMOVAL",
            "MAKEUP",
            "SKINCARE",
            "OTHER",
        ] {
            let parsed = ServiceCategory::from_str(category).unwrap();
            assert_eq!(parsed.to_string(), category);
        }
    }
}
