use actix_web::{post, web, HttpResponse};
use secrecy::Secret;
use serde_json::Value;
use sqlx::SqlitePool;

use crate::errors::{AppError, ErrorResponse, UnauthorizedResponse};
use crate::extractors::require_body;

use super::models::{AccessTokenResponse, LoginDto};
use super::service::AuthService;

const MISSING_CREDENTIALS: &str = "Username or password is missing";

/// POST /login - Authenticate and get an access token
#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Login successful", body = AccessTokenResponse),
        (status = 400, description = "Missing body or credentials", body = ErrorResponse),
        (status = 401, description = "Bad username or password", body = UnauthorizedResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[post("/login")]
pub async fn login(
    pool: web::Data<SqlitePool>,
    jwt_secret: web::Data<Secret<String>>,
    body: Option<web::Json<Value>>,
) -> Result<HttpResponse, AppError> {
    let body = require_body(body)?;
    let dto: LoginDto = serde_json::from_value(Value::Object(body)).unwrap_or_default();
    let (username, password) = dto
        .credentials()
        .ok_or_else(|| AppError::BadRequest(MISSING_CREDENTIALS.to_string()))?;

    let mut conn = pool.acquire().await?;
    let access_token = AuthService::login(&mut conn, jwt_secret.get_ref(), username, password).await?;

    Ok(HttpResponse::Ok().json(AccessTokenResponse { access_token }))
}
