//! Book (catalog) endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{Book, BookDraft, BookSort, BookView, ListQuery, Page},
    AppState,
};

use super::DeleteResponse;

/// List books with search, sort and pagination
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive substring filter"),
        ("sort" = Option<String>, Query, description = "title (default), author, published or status"),
        ("order" = Option<String>, Query, description = "asc or desc"),
        ("page" = Option<usize>, Query, description = "Page number (default: 1)"),
        ("per_page" = Option<usize>, Query, description = "Items per page (default: 5)")
    ),
    responses(
        (status = 200, description = "Page of books with derived status", body = Page<BookView>)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<ListQuery<BookSort>>,
) -> AppResult<Json<Page<BookView>>> {
    let page = state.services.books.list_books(&query).await?;
    Ok(Json(page))
}

/// Books whose derived status allows a new lending
#[utoipa::path(
    get,
    path = "/books/available",
    tag = "books",
    responses(
        (status = 200, description = "Books that can be lent", body = Vec<BookView>)
    )
)]
pub async fn available_books(State(state): State<AppState>) -> AppResult<Json<Vec<BookView>>> {
    let books = state.services.books.available_books().await?;
    Ok(Json(books))
}

/// Get a book with its derived status
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = BookView),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Json<BookView>> {
    let book = state.services.books.get_book(id).await?;
    Ok(Json(book))
}

#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookDraft,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input"),
        (status = 502, description = "Store rejected the book")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    Json(draft): Json<BookDraft>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let created = state.services.books.create_book(draft).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = BookDraft,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(draft): Json<BookDraft>,
) -> AppResult<Json<Book>> {
    let updated = state.services.books.update_book(id, draft).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book and its lendings deleted", body = DeleteResponse),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Json<DeleteResponse>> {
    state.services.books.delete_book(id).await?;
    Ok(Json(DeleteResponse::deleted(id)))
}
