//! API handlers for the admin REST endpoints

pub mod books;
pub mod health;
pub mod lendings;
pub mod members;
pub mod openapi;
pub mod overdue;

use axum::{
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::ToSchema;

use crate::AppState;

/// Body returned by delete endpoints
#[derive(Serialize, ToSchema)]
pub struct DeleteResponse {
    pub status: String,
    pub id: i32,
}

impl DeleteResponse {
    pub fn deleted(id: i32) -> Self {
        Self {
            status: "deleted".to_string(),
            id,
        }
    }
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Books (catalog)
        .route("/books", get(books::list_books).post(books::create_book))
        .route("/books/available", get(books::available_books))
        .route(
            "/books/:id",
            get(books::get_book).put(books::update_book).delete(books::delete_book),
        )
        // Members
        .route("/members", get(members::list_members).post(members::create_member))
        .route(
            "/members/:id",
            get(members::get_member)
                .put(members::update_member)
                .delete(members::delete_member),
        )
        // Lendings
        .route("/lendings", get(lendings::list_lendings).post(lendings::create_lending))
        .route(
            "/lendings/:id",
            get(lendings::get_lending)
                .put(lendings::update_lending)
                .delete(lendings::delete_lending),
        )
        .route("/lendings/:id/return", post(lendings::return_lending))
        // Overdue report
        .route("/overdue", get(overdue::overdue_report))
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
