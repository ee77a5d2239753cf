use std::sync::Arc;

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use chrono::{Duration, Utc};
use rand::RngCore;
use tracing::info;
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::middleware::auth::hash_token;
use crate::modules::auth::models::{LoginResponse, User, UserSummary};
use crate::modules::auth::repositories::UserRepository;

/// Login, token issuance and revocation.
pub struct AuthService {
    user_repo: Arc<UserRepository>,
    token_ttl_hours: u32,
}

impl AuthService {
    pub fn new(user_repo: Arc<UserRepository>, token_ttl_hours: u32) -> Self {
        Self {
            user_repo,
            token_ttl_hours,
        }
    }

    /// Verify credentials and issue a fresh bearer token.
    ///
    /// The plaintext token is returned to the client exactly once; only its
    /// SHA-256 digest is persisted.
    pub async fn login(&self, phone_number: &str, password: &str) -> Result<LoginResponse> {
        let user = self
            .user_repo
            .find_by_phone(phone_number)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid credentials"))?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::unauthorized("Invalid credentials"));
        }

        let token = generate_token();
        let expires_at = Utc::now() + Duration::hours(i64::from(self.token_ttl_hours));

        self.user_repo
            .insert_token(
                &Uuid::new_v4().to_string(),
                &user.id,
                &hash_token(&token),
                expires_at,
            )
            .await?;

        info!(user_id = %user.id, "User logged in");

        Ok(LoginResponse {
            token,
            expires_at,
            user: UserSummary::from(&user),
        })
    }

    /// Revoke the presented token. Revoking an unknown token succeeds.
    pub async fn logout(&self, token: &str) -> Result<()> {
        self.user_repo.delete_token(&hash_token(token)).await
    }

    pub async fn current_user(&self, user_id: &str) -> Result<User> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))
    }
}

/// Random 256-bit token, hex encoded.
fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::internal(format!("Invalid password hash: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Hash a password for storage. Used by seeding and user provisioning.
pub fn hash_password(password: &str) -> Result<String> {
    use argon2::password_hash::{rand_core::OsRng, PasswordHasher, SaltString};

    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_password() {
        let hash = hash_password("hunter2").unwrap();
        assert!(verify_password("hunter2", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_generated_tokens_are_unique() {
        let a = generate_token();
        let b = generate_token();
        assert_ne!(a, b);
        assert_eq!(a.len(), 64);
    }
}
