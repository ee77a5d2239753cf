use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::auth::models::UserSummary;
use crate::modules::catalog::models::{Service, ServiceCategory};

pub const MAX_NOTES_LEN: usize = 500;

/// Appointment status lifecycle.
///
/// Cancellation is a status write, not a row deletion: the ledger is
/// append-mostly and cancelled appointments stay reportable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR(20)", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
}

impl Default for AppointmentStatus {
    fn default() -> Self {
        AppointmentStatus::Scheduled
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AppointmentStatus::Scheduled => "SCHEDULED",
            AppointmentStatus::Confirmed => "CONFIRMED",
            AppointmentStatus::InProgress => "IN_PROGRESS",
            AppointmentStatus::Completed => "COMPLETED",
            AppointmentStatus::Cancelled => "CANCELLED",
            AppointmentStatus::NoShow => "NO_SHOW",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "SCHEDULED" => Ok(AppointmentStatus::Scheduled),
            "CONFIRMED" => Ok(AppointmentStatus::Confirmed),
            "IN_PROGRESS" => Ok(AppointmentStatus::InProgress),
            "COMPLETED" => Ok(AppointmentStatus::Completed),
            "CANCELLED" => Ok(AppointmentStatus::Cancelled),
            "NO_SHOW" => Ok(AppointmentStatus::NoShow),
            _ => Err(format!("Invalid appointment status: {}", s)),
        }
    }
}

impl AppointmentStatus {
    /// Single gate for status transitions. Every transition is currently
    /// admitted (COMPLETED back to SCHEDULED included); call sites go
    /// through here so a stricter state machine can land in one place.
    pub fn is_transition_allowed(self, _to: AppointmentStatus) -> bool {
        true
    }
}

/// The central ledger entity. `duration` and `price` are derived from the
/// attached services and are never client-settable.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub customer_id: String,
    pub staff_id: String,
    pub appointment_date: DateTime<Utc>,
    /// Minutes, sum over the attached services
    pub duration: i32,
    /// Sum over the attached services
    pub price: Decimal,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Attached service ids, loaded from `appointment_services`.
    #[sqlx(skip)]
    pub service_ids: Vec<String>,
}

impl Appointment {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        customer_id: String,
        staff_id: String,
        service_ids: Vec<String>,
        appointment_date: DateTime<Utc>,
        duration: i32,
        price: Decimal,
        status: AppointmentStatus,
        notes: Option<String>,
        created_by: String,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4().to_string(),
            customer_id,
            staff_id,
            appointment_date,
            duration,
            price,
            status,
            notes,
            created_by,
            created_at: now,
            updated_at: now,
            service_ids,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    pub customer_id: String,
    pub staff_id: String,
    pub service_ids: Vec<String>,
    pub appointment_date: DateTime<Utc>,
    #[serde(default)]
    pub status: Option<AppointmentStatus>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Partial update: only the fields present in the request change on the
/// stored record. `duration`/`price` are not accepted here at all; they
/// follow the service selection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentRequest {
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub staff_id: Option<String>,
    #[serde(default)]
    pub service_ids: Option<Vec<String>>,
    #[serde(default)]
    pub appointment_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<AppointmentStatus>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Blank notes normalize to unset; overlong notes are rejected.
pub fn normalize_notes(notes: Option<String>) -> Result<Option<String>> {
    match notes {
        None => Ok(None),
        Some(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            if trimmed.len() > MAX_NOTES_LEN {
                return Err(AppError::validation("Notes cannot exceed 500 characters"));
            }
            Ok(Some(trimmed.to_string()))
        }
    }
}

/// Customer projection joined onto appointment reads.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerBrief {
    pub id: String,
    pub name: String,
    pub phone_number: String,
}

/// Staff projection joined onto appointment reads.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffBrief {
    pub id: String,
    pub name: String,
}

/// Service projection joined onto appointment reads.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceBrief {
    pub id: String,
    pub name: String,
    pub category: ServiceCategory,
    pub duration: i32,
    pub price: Decimal,
}

impl From<Service> for ServiceBrief {
    fn from(service: Service) -> Self {
        Self {
            id: service.id,
            name: service.name,
            category: service.category,
            duration: service.duration,
            price: service.price,
        }
    }
}

/// A fully resolved appointment for presentation. Referenced entities that
/// have since been deleted come back as `null` rather than failing the read.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentResponse {
    pub id: String,
    pub customer: Option<CustomerBrief>,
    pub staff: Option<StaffBrief>,
    pub services: Vec<ServiceBrief>,
    pub appointment_date: DateTime<Utc>,
    pub duration: i32,
    pub price: Decimal,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub created_by: Option<UserSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_default_is_scheduled() {
        assert_eq!(AppointmentStatus::default(), AppointmentStatus::Scheduled);
    }

    #[test]
    fn test_all_transitions_are_admitted() {
        let states = [
            AppointmentStatus::Scheduled,
            AppointmentStatus::Confirmed,
            AppointmentStatus::InProgress,
            AppointmentStatus::Completed,
            AppointmentStatus::Cancelled,
            AppointmentStatus::NoShow,
        ];
        for from in states {
            for to in states {
                assert!(from.is_transition_allowed(to));
            }
        }
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&AppointmentStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");
        let json = serde_json::to_string(&AppointmentStatus::NoShow).unwrap();
        assert_eq!(json, "\"NO_SHOW\"");
    }

    #[test]
    fn test_normalize_notes() {
        assert_eq!(normalize_notes(None).unwrap(), None);
        assert_eq!(normalize_notes(Some("  ".to_string())).unwrap(), None);
        assert_eq!(
            normalize_notes(Some(" bring own polish ".to_string())).unwrap(),
            Some("bring own polish".to_string())
        );
        assert!(normalize_notes(Some("x".repeat(501))).is_err());
    }
}
