//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, lendings, members, overdue};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library Admin API",
        version = "0.1.0",
        description = "Catalog, member and lending administration with overdue fines"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        // Books
        books::list_books,
        books::available_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Members
        members::list_members,
        members::get_member,
        members::create_member,
        members::update_member,
        members::delete_member,
        // Lendings
        lendings::list_lendings,
        lendings::get_lending,
        lendings::create_lending,
        lendings::update_lending,
        lendings::return_lending,
        lendings::delete_lending,
        // Overdue
        overdue::overdue_report,
    ),
    components(
        schemas(
            // Books
            crate::models::Book,
            crate::models::BookDraft,
            crate::models::BookView,
            crate::models::BookStatus,
            // Members
            crate::models::Member,
            crate::models::MemberDraft,
            // Lendings
            crate::models::Lending,
            crate::models::LendingDraft,
            lendings::ReturnResponse,
            // Overdue
            crate::models::OverdueRow,
            crate::models::OverdueEntry,
            crate::models::OverdueSummary,
            crate::services::overdue::OverdueReport,
            // Shared
            crate::api::DeleteResponse,
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
            crate::error::ErrorDetail,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Catalog management"),
        (name = "members", description = "Member management"),
        (name = "lendings", description = "Lending management"),
        (name = "overdue", description = "Overdue lendings and fines")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
