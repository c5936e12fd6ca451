use secrecy::Secret;
use sqlx::SqliteConnection;
use tracing::{info, warn};

use crate::errors::AppError;

use super::jwt::create_access_token;
use super::models::{NewUser, User};
use super::password::verify_dummy;

pub const BAD_CREDENTIALS: &str = "Bad username or password";

/// Repository functions for the user table
pub struct UserService;

impl UserService {
    /// Insert a user; a duplicate username surfaces as the storage error
    pub async fn insert(conn: &mut SqliteConnection, user: &NewUser) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO "user" (username, password_hash)
            VALUES (?, ?)
            RETURNING id, username, password_hash
            "#,
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))
    }

    pub async fn find_by_username(
        conn: &mut SqliteConnection,
        username: &str,
    ) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(r#"SELECT id, username, password_hash FROM "user" WHERE username = ?"#)
            .bind(username)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))
    }
}

/// Authentication service handling login
pub struct AuthService;

impl AuthService {
    /// Authenticate by username and password and issue an access token
    pub async fn login(
        conn: &mut SqliteConnection,
        jwt_secret: &Secret<String>,
        username: &str,
        password: &str,
    ) -> Result<String, AppError> {
        let Some(user) = UserService::find_by_username(conn, username).await? else {
            verify_dummy(password);
            warn!(username, "Login attempt for unknown user");
            return Err(AppError::Unauthorized(BAD_CREDENTIALS.to_string()));
        };

        if !user.check_password(password)? {
            warn!(username, "Login attempt with wrong password");
            return Err(AppError::Unauthorized(BAD_CREDENTIALS.to_string()));
        }

        let token = create_access_token(&user.username, jwt_secret)?;
        info!(username, "User logged in");
        Ok(token)
    }
}
