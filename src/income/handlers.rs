use actix_web::{get, post, web, HttpResponse};
use sqlx::SqlitePool;

use crate::entry::{EntryKind, EntryResponse, EntryService};
use crate::errors::{AppError, ErrorResponse, UnauthorizedResponse};
use crate::extractors::AuthenticatedUser;

async fn all_incomes(pool: &SqlitePool) -> Result<HttpResponse, AppError> {
    let mut conn = pool.acquire().await?;
    let incomes = EntryService::list_all(&mut conn, EntryKind::Income).await?;

    let response: Vec<EntryResponse> = incomes.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(response))
}

/// GET /incomes - List every income
#[utoipa::path(
    get,
    path = "/incomes",
    tag = "Incomes",
    responses(
        (status = 200, description = "All incomes in insertion order", body = Vec<EntryResponse>),
        (status = 401, description = "Unauthorized", body = UnauthorizedResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[get("/incomes")]
pub async fn list_incomes(
    _auth: AuthenticatedUser,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    all_incomes(pool.get_ref()).await
}

/// POST /incomes - Same listing as GET, kept for older clients
#[utoipa::path(
    post,
    path = "/incomes",
    tag = "Incomes",
    responses(
        (status = 200, description = "All incomes in insertion order", body = Vec<EntryResponse>),
        (status = 401, description = "Unauthorized", body = UnauthorizedResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[post("/incomes")]
pub async fn list_incomes_via_post(
    _auth: AuthenticatedUser,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    all_incomes(pool.get_ref()).await
}
