use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::errors::AppError;

use super::password::{hash_password, verify_password};

// ============================================================================
// User Models
// ============================================================================

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

impl User {
    /// Check a plaintext password against the stored hash
    pub fn check_password(&self, password: &str) -> Result<bool, AppError> {
        verify_password(password, &self.password_hash)
    }
}

/// User record built in memory before it is inserted
#[derive(Debug, Clone, Validate)]
pub struct NewUser {
    #[validate(length(max = 80, message = "Username must be at most 80 characters"))]
    pub username: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn new(username: &str, password: &str) -> Result<Self, AppError> {
        let mut user = Self {
            username: username.to_string(),
            password_hash: String::new(),
        };
        user
            .validate()
            .map_err(|e| AppError::InternalError(e.to_string()))?;
        user.set_password(password)?;
        Ok(user)
    }

    /// Replace the stored hash with a freshly salted hash of `password`
    pub fn set_password(&mut self, password: &str) -> Result<(), AppError> {
        self.password_hash = hash_password(password)?;
        Ok(())
    }
}

/// Request body for user login
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LoginDto {
    #[schema(example = "alice")]
    pub username: Option<String>,
    #[schema(example = "s3cret")]
    pub password: Option<String>,
}

impl LoginDto {
    /// Both credentials, if present and non-empty
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let username = self.username.as_deref().filter(|u| !u.is_empty())?;
        let password = self.password.as_deref().filter(|p| !p.is_empty())?;
        Some((username, password))
    }
}

// ============================================================================
// Token Models
// ============================================================================

/// JWT access token claims
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String, // Username
    pub iat: usize,  // Issued at
    pub exp: usize,  // Expiration
}

/// Response for a successful login
#[derive(Debug, Serialize, ToSchema)]
pub struct AccessTokenResponse {
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
}
