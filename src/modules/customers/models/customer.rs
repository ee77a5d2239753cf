use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::{AppError, Result};

/// A salon customer. Appointments reference customers by id only; deleting
/// a customer leaves historical appointments pointing at a dangling id.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone_number: String,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub total_appointments: i64,
    pub total_spent: Decimal,
    pub last_visit: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    pub fn new(request: CreateCustomerRequest) -> Result<Self> {
        validate_name(&request.name)?;
        validate_phone_number(&request.phone_number)?;

        let now = Utc::now();

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: request.name.trim().to_string(),
            email: normalize_optional(request.email).map(|e| e.to_lowercase()),
            phone_number: request.phone_number.trim().to_string(),
            address: normalize_optional(request.address),
            notes: normalize_optional(request.notes),
            total_appointments: 0,
            total_spent: Decimal::ZERO,
            last_visit: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a partial update: only fields present in the request change.
    pub fn apply_update(&mut self, request: UpdateCustomerRequest) -> Result<()> {
        if let Some(name) = request.name {
            validate_name(&name)?;
            self.name = name.trim().to_string();
        }
        if let Some(phone_number) = request.phone_number {
            validate_phone_number(&phone_number)?;
            self.phone_number = phone_number.trim().to_string();
        }
        if let Some(email) = request.email {
            self.email = normalize_optional(Some(email)).map(|e| e.to_lowercase());
        }
        if let Some(address) = request.address {
            self.address = normalize_optional(Some(address));
        }
        if let Some(notes) = request.notes {
            self.notes = normalize_optional(Some(notes));
        }
        self.updated_at = Utc::now();

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    pub name: String,
    pub phone_number: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
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

fn validate_phone_number(phone_number: &str) -> Result<()> {
    if phone_number.trim().is_empty() {
        return Err(AppError::validation("Phone number is required"));
    }
    Ok(())
}

/// Blank optional text fields are stored as NULL, never as empty strings.
pub(crate) fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request() -> CreateCustomerRequest {
        CreateCustomerRequest {
            name: "  Amira Hassan  ".to_string(),
            phone_number: "+6281234567890".to_string(),
            email: Some("Amira@Example.com".to_string()),
            address: None,
            notes: Some("   ".to_string()),
        }
    }

    #[test]
    fn test_new_customer_normalizes_fields() {
        let customer = Customer::new(create_request()).unwrap();
        assert_eq!(customer.name, "Amira Hassan");
        assert_eq!(customer.email.as_deref(), Some("amira@example.com"));
        assert_eq!(customer.notes, None);
        assert_eq!(customer.total_appointments, 0);
        assert_eq!(customer.total_spent, Decimal::ZERO);
    }

    #[test]
    fn test_short_name_rejected() {
        let mut request = create_request();
        request.name = "A".to_string();
        assert!(Customer::new(request).is_err());
    }

    #[test]
    fn test_partial_update_leaves_absent_fields() {
        let mut customer = Customer::new(create_request()).unwrap();
        let before_phone = customer.phone_number.clone();

        customer
            .apply_update(UpdateCustomerRequest {
                notes: Some("prefers evening slots".to_string()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(customer.phone_number, before_phone);
        assert_eq!(customer.notes.as_deref(), Some("prefers evening slots"));
    }
}
