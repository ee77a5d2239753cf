use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::{AppError, Result};

/// A staff member who performs appointments. Referenced by appointments via
/// id only; deleting a staff member does not touch historical appointments.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub id: String,
    pub name: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
}

impl StaffMember {
    pub fn new(request: CreateStaffRequest) -> Result<Self> {
        validate_name(&request.name)?;
        validate_phone_number(&request.phone_number)?;

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: request.name.trim().to_string(),
            phone_number: request.phone_number.trim().to_string(),
            created_at: Utc::now(),
        })
    }

    /// Apply a partial update: only fields present in the request change.
    pub fn apply_update(&mut self, request: UpdateStaffRequest) -> Result<()> {
        if let Some(name) = request.name {
            validate_name(&name)?;
            self.name = name.trim().to_string();
        }
        if let Some(phone_number) = request.phone_number {
            validate_phone_number(&phone_number)?;
            self.phone_number = phone_number.trim().to_string();
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStaffRequest {
    pub name: String,
    pub phone_number: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStaffRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_staff_member() {
        let staff = StaffMember::new(CreateStaffRequest {
            name: " Putri ".to_string(),
            phone_number: "+628111222333".to_string(),
        })
        .unwrap();
        assert_eq!(staff.name, "Putri");
        assert!(!staff.id.is_empty());
    }

    #[test]
    fn test_update_only_phone() {
        let mut staff = StaffMember::new(CreateStaffRequest {
            name: "Putri".to_string(),
            phone_number: "+628111222333".to_string(),
        })
        .unwrap();

        staff
            .apply_update(UpdateStaffRequest {
                phone_number: Some("+628999888777".to_string()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(staff.name, "Putri");
        assert_eq!(staff.phone_number, "+628999888777");
    }
}
