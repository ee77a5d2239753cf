use crate::core::AppError;
use crate::modules::auth::models::UserRole;
use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use sha2::{Digest, Sha256};
use sqlx::MySqlPool;
use std::future::{ready, Ready};
use std::rc::Rc;

/// Bearer token authentication middleware.
///
/// Tokens are opaque: the client presents the value issued at login and the
/// middleware looks up its SHA-256 digest in the `auth_tokens` table. On
/// success the resolved user is stored in the request extensions for
/// handlers to extract.
pub struct BearerAuth {
    pool: MySqlPool,
}

impl BearerAuth {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

impl<S, B> Transform<S, ServiceRequest> for BearerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = BearerAuthMiddleware<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthMiddleware {
            service: Rc::new(service),
            pool: self.pool.clone(),
        }))
    }
}

pub struct BearerAuthMiddleware<S> {
    service: Rc<S>,
    pool: MySqlPool,
}

impl<S, B> Service<ServiceRequest> for BearerAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();
        let pool = self.pool.clone();

        Box::pin(async move {
            // Login and liveness probes are reachable without a token
            let path = req.path();
            if path == "/health" || path == "/ready" || path == "/" || path == "/auth/login" {
                return svc.call(req).await;
            }

            let token = req
                .headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok())
                .and_then(|h| h.strip_prefix("Bearer "))
                .ok_or_else(|| {
                    Error::from(AppError::unauthorized("Not authorized to access this route"))
                })?;

            let user = resolve_token(&pool, token).await.map_err(Error::from)?;

            req.extensions_mut().insert(user);

            svc.call(req).await
        })
    }
}

/// The user resolved from the bearer token of the current request.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AuthenticatedUser {
    pub id: String,
    pub name: String,
    pub role: UserRole,
}

impl AuthenticatedUser {
    /// Role gate used by handlers, mirroring per-route authorization.
    pub fn authorize(&self, allowed: &[UserRole]) -> crate::core::Result<()> {
        if allowed.contains(&self.role) {
            return Ok(());
        }
        Err(AppError::forbidden(format!(
            "User role '{}' is not authorized to access this route",
            self.role
        )))
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<std::result::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthenticatedUser>()
                .cloned()
                .ok_or_else(|| AppError::unauthorized("Not authorized to access this route")),
        )
    }
}

/// Hash a token value the way it is stored in `auth_tokens`.
pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

async fn resolve_token(pool: &MySqlPool, token: &str) -> crate::core::Result<AuthenticatedUser> {
    let token_hash = hash_token(token);

    sqlx::query_as::<_, AuthenticatedUser>(
        r#"
        SELECT u.id, u.name, u.role
        FROM auth_tokens t
        INNER JOIN users u ON u.id = t.user_id
        WHERE t.token_hash = ? AND t.expires_at > UTC_TIMESTAMP()
        LIMIT 1
        "#,
    )
    .bind(token_hash)
    .fetch_optional(pool)
    .await
    .map_err(AppError::Database)?
    .ok_or_else(|| AppError::unauthorized("Not authorized to access this route"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_token_is_stable_hex() {
        let a = hash_token("secret-token");
        let b = hash_token("secret-token");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_authorize_allows_listed_role() {
        let user = AuthenticatedUser {
            id: "u1".to_string(),
            name: "Dana".to_string(),
            role: UserRole::Receptionist,
        };
        assert!(user
            .authorize(&[UserRole::Owner, UserRole::Receptionist])
            .is_ok());
        assert!(user.authorize(&[UserRole::Owner]).is_err());
    }
}
