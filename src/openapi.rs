use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::auth::models::{AccessTokenResponse, LoginDto};
use crate::entry::models::{CreateEntryDto, EntryResponse};
use crate::errors::{ErrorResponse, UnauthorizedResponse};
use crate::models::MessageResponse;

/// Security scheme modifier for Bearer token authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from POST /login"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation configuration
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Fintrack API",
        version = "0.1.0",
        description = "Expense and income tracking with token-based login",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Auth", description = "Login and access tokens"),
        (name = "Expenses", description = "Expense recording and listing"),
        (name = "Incomes", description = "Income listing")
    ),
    paths(
        crate::health::health_check,
        crate::auth::handlers::login,
        crate::expense::handlers::create_expense,
        crate::expense::handlers::list_expenses,
        crate::income::handlers::list_incomes,
        crate::income::handlers::list_incomes_via_post,
    ),
    components(
        schemas(
            ErrorResponse,
            UnauthorizedResponse,
            MessageResponse,
            LoginDto,
            AccessTokenResponse,
            CreateEntryDto,
            EntryResponse,
        )
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;
