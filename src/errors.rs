use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;
use tracing::error;
use utoipa::ToSchema;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Unauthorized(String),
    InternalError(String),
}

/// Standard error response format
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error kind ("Bad Request" or "Internal Server Error")
    #[schema(example = "Bad Request")]
    pub error: String,
    /// Human-readable error message
    #[schema(example = "Request data is missing")]
    pub message: String,
}

/// Body returned for authentication failures
#[derive(Debug, Serialize, ToSchema)]
pub struct UnauthorizedResponse {
    #[schema(example = "Bad username or password")]
    pub msg: String,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {msg}"),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
            AppError::InternalError(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        match self {
            AppError::BadRequest(msg) => builder.json(ErrorResponse {
                error: "Bad Request".to_string(),
                message: msg.clone(),
            }),
            AppError::Unauthorized(msg) => builder.json(UnauthorizedResponse { msg: msg.clone() }),
            AppError::InternalError(msg) => {
                // Detail goes to the client verbatim as well as to the log
                error!("Internal error: {msg}");
                builder.json(ErrorResponse {
                    error: "Internal Server Error".to_string(),
                    message: msg.clone(),
                })
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}
