use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Back-office user roles. Owners see everything including revenue;
/// receptionists handle the appointment book and customer records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR(20)", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Owner,
    Receptionist,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Owner => write!(f, "OWNER"),
            UserRole::Receptionist => write!(f, "RECEPTIONIST"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "OWNER" => Ok(UserRole::Owner),
            "RECEPTIONIST" => Ok(UserRole::Receptionist),
            _ => Err(format!("Invalid user role: {}", s)),
        }
    }
}

/// A back-office user account.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub phone_number: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// Login request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub phone_number: String,
    pub password: String,
}

/// Successful login payload: the plaintext token is returned exactly once.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserSummary,
}

/// Reduced user projection used in responses and appointment joins.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub role: UserRole,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            role: user.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_round_trip() {
        assert_eq!(UserRole::from_str("OWNER").unwrap(), UserRole::Owner);
        assert_eq!(
            UserRole::from_str("RECEPTIONIST").unwrap(),
            UserRole::Receptionist
        );
        assert_eq!(UserRole::Owner.to_string(), "OWNER");
        assert!(UserRole::from_str("MANAGER").is_err());
    }

    #[test]
    fn test_role_serde_screaming_snake() {
        let json = serde_json::to_string(&UserRole::Receptionist).unwrap();
        assert_eq!(json, "\"RECEPTIONIST\"");
    }
}
