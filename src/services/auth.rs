use serde::Serialize;
use tracing::{info, warn};

use crate::auth::{generate_jwt, hash_password, verify_password, Claims};
use crate::database::models::User;
use crate::database::repository::UserRepository;
use crate::dto::{Credentials, Registration};
use crate::services::error::{ServiceError, ServiceResult};

#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
}

#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
}

impl AuthService {
    pub fn new(users: UserRepository) -> Self {
        Self { users }
    }

    pub async fn register(&self, registration: Registration) -> ServiceResult<User> {
        if self.users.find_by_email(&registration.email).await?.is_some() {
            return Err(ServiceError::conflict("email already registered"));
        }

        let password = registration.password;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| ServiceError::Internal(format!("password hashing task failed: {e}")))?
            .map_err(|e| ServiceError::Internal(format!("password hashing failed: {e}")))?;

        let user = self
            .users
            .create(&registration.name, &registration.email, &password_hash)
            .await?;
        info!("Registered user {} ({})", user.id, user.email);
        Ok(user)
    }

    /// Unknown email and wrong password produce the same error
    pub async fn login(&self, credentials: Credentials) -> ServiceResult<TokenResponse> {
        let invalid = || ServiceError::Unauthorized("invalid email or password".to_string());

        let Some(user) = self.users.find_by_email(&credentials.email).await? else {
            warn!("Login failed: unknown email");
            return Err(invalid());
        };

        let hash = user.password_hash.clone();
        let password = credentials.password;
        let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|e| ServiceError::Internal(format!("password check task failed: {e}")))?
            .map_err(|e| ServiceError::Internal(format!("password check failed: {e}")))?;

        if !matches {
            warn!("Login failed for user {}", user.id);
            return Err(invalid());
        }

        let claims = Claims::new(user.id, user.email.clone());
        let token = generate_jwt(&claims).map_err(|e| ServiceError::Internal(e.to_string()))?;

        info!("User {} logged in", user.id);
        Ok(TokenResponse {
            token,
            token_type: "Bearer",
            expires_in: claims.expires_in(),
        })
    }
}
