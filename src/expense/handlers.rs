use actix_web::{get, post, web, HttpResponse};
use serde_json::Value;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::entry::{CreateEntryDto, EntryKind, EntryResponse, EntryService, NewEntry};
use crate::errors::{AppError, ErrorResponse, UnauthorizedResponse};
use crate::extractors::{require_body, AuthenticatedUser};
use crate::models::MessageResponse;

/// POST /expenses - Record a new expense
#[utoipa::path(
    post,
    path = "/expenses",
    tag = "Expenses",
    request_body = CreateEntryDto,
    responses(
        (status = 201, description = "Expense created", body = MessageResponse),
        (status = 400, description = "Missing body or field", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = UnauthorizedResponse),
        (status = 500, description = "Invalid date or storage failure", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[post("/expenses")]
pub async fn create_expense(
    auth: AuthenticatedUser,
    pool: web::Data<SqlitePool>,
    body: Option<web::Json<Value>>,
) -> Result<HttpResponse, AppError> {
    let dto = CreateEntryDto::from_body(&require_body(body)?)?;
    let (name, amount, date) = dto.into_fields()?;
    let expense = NewEntry::create(name, amount, &date)?;

    let mut tx = pool.begin().await?;
    let created = match EntryService::insert(&mut tx, EntryKind::Expense, &expense).await {
        Ok(created) => created,
        Err(e) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!("Failed to roll back expense insert: {rollback_err}");
            }
            return Err(e);
        }
    };
    tx.commit().await?;

    info!(id = created.id, user = %auth.username, "Expense created");

    Ok(HttpResponse::Created().json(MessageResponse::new(format!(
        "{} created successfully",
        EntryKind::Expense.label()
    ))))
}

/// GET /expenses - List every expense
#[utoipa::path(
    get,
    path = "/expenses",
    tag = "Expenses",
    responses(
        (status = 200, description = "All expenses in insertion order", body = Vec<EntryResponse>),
        (status = 401, description = "Unauthorized", body = UnauthorizedResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[get("/expenses")]
pub async fn list_expenses(
    _auth: AuthenticatedUser,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let mut conn = pool.acquire().await?;
    let expenses = EntryService::list_all(&mut conn, EntryKind::Expense).await?;

    let response: Vec<EntryResponse> = expenses.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(response))
}
