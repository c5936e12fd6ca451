use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{auth, expense, health, income, openapi};

/// Register every route. Shared state (pool, JWT secret) is attached by the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}")
            .url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
    )
    .service(health::health_check)
    .service(auth::login)
    .service(expense::create_expense)
    .service(expense::list_expenses)
    .service(income::list_incomes)
    .service(income::list_incomes_via_post);
}
