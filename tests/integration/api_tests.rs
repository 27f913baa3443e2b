//! API integration tests
//!
//! Most tests drive the router in-process over the memory store with a
//! pinned clock. The `#[ignore]` ones expect a running server.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use serde_json::{json, Value};
use tower::ServiceExt;

use library_admin::{
    api,
    config::{AppConfig, StoreBackend},
    engine::Clock,
    models::{Book, BookStatus, Lending, Member},
    repository::{MemoryStore, Repository},
    services::Services,
    AppState,
};

const BASE_URL: &str = "http://localhost:8080/api/v1";

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn book(id: i32, title: &str, year: i32, status: BookStatus) -> Book {
    Book {
        id,
        title: title.to_string(),
        author: "Some Author".to_string(),
        isbn: format!("978000000{:04}", id),
        published_year: year,
        published_month: 1,
        status,
    }
}

/// Two books, one member and an active lending of book 1 due 2024-01-10
fn seeded_store() -> MemoryStore {
    MemoryStore::with_records(
        vec![
            book(1, "Dune", 1965, BookStatus::Borrowed),
            book(2, "Emma", 1815, BookStatus::Available),
        ],
        vec![Member {
            id: 3,
            full_name: "Ann Brown".to_string(),
            joining_date: date("2023-05-01"),
            email: "ann@example.com".to_string(),
            phone_number: "+445678".to_string(),
            is_whatsapp_applicable: true,
        }],
        vec![Lending {
            id: 4,
            book_id: 1,
            member_id: 3,
            borrow_date: date("2024-01-01"),
            due_date: date("2024-01-10"),
            return_date: None,
        }],
    )
}

fn app(store: MemoryStore) -> Router {
    let mut config = AppConfig::default();
    config.store.backend = StoreBackend::Memory;
    let services = Services::new(
        Repository::new(store),
        config.lending.clone(),
        Clock::Fixed(date("2024-01-15")),
    );
    api::router(AppState::new(config, services))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(match body {
            Some(json) => Body::from(json.to_string()),
            None => Body::empty(),
        })
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_health() {
    let app = app(seeded_store());
    let (status, body) = send(&app, "GET", "/api/v1/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"], "memory");
}

#[tokio::test]
async fn test_list_books_with_derived_status() {
    let app = app(seeded_store());
    let (status, body) = send(&app, "GET", "/api/v1/books?sort=published&order=desc", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert_eq!(body["per_page"], 5);
    assert_eq!(body["total_pages"], 1);
    assert_eq!(body["items"][0]["title"], "Dune");
    assert_eq!(body["items"][0]["derived_status"], "borrowed");
    assert_eq!(body["items"][0]["status_drift"], false);
    assert_eq!(body["items"][1]["title"], "Emma");
}

#[tokio::test]
async fn test_page_beyond_last_is_empty() {
    let books = (1..=12)
        .map(|id| book(id, &format!("Book {:02}", id), 2000, BookStatus::Available))
        .collect();
    let app = app(MemoryStore::with_records(books, vec![], vec![]));

    let (status, body) = send(&app, "GET", "/api/v1/books?per_page=5&page=4", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"], json!([]));
    assert_eq!(body["total"], 12);
    assert_eq!(body["total_pages"], 3);

    let (_, body) = send(&app, "GET", "/api/v1/books?per_page=5&page=3", None).await;
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
    assert_eq!(body["items"][0]["title"], "Book 11");
}

#[tokio::test]
async fn test_available_books_exclude_lent() {
    let app = app(seeded_store());
    let (status, body) = send(&app, "GET", "/api/v1/books/available", None).await;

    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Emma"]);
}

#[tokio::test]
async fn test_double_booking_rejected_then_return_frees_book() {
    let app = app(seeded_store());

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/lendings",
        Some(json!({
            "book_id": 1,
            "member_id": 3,
            "borrow_date": "2024-01-12",
            "due_date": "2024-01-26"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 7);
    assert_eq!(body["details"][0]["code"], "book_unavailable");

    let (status, body) = send(&app, "POST", "/api/v1/lendings/4/return", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "returned");
    assert_eq!(body["lending"]["return_date"], "2024-01-15");
    assert_eq!(body["book_status"], "available");

    let (status, body) = send(&app, "GET", "/api/v1/books/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["derived_status"], "available");
    assert_eq!(body["status"], "borrowed");
    assert_eq!(body["status_drift"], true);

    let (status, _) = send(&app, "POST", "/api/v1/lendings/4/return", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_lending() {
    let app = app(seeded_store());
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/lendings",
        Some(json!({
            "book_id": 2,
            "member_id": 3,
            "borrow_date": "2024-01-12",
            "due_date": "2024-01-26",
            "return_date": ""
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 5);
    assert_eq!(body["return_date"], Value::Null);

    let (_, body) = send(&app, "GET", "/api/v1/books/available", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_invalid_lending_reports_every_problem() {
    let app = app(seeded_store());

    let (status, body) = send(&app, "POST", "/api/v1/lendings", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 18);
    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["book_id", "member_id", "borrow_date", "due_date"]);

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/lendings",
        Some(json!({
            "book_id": 2,
            "member_id": 3,
            "borrow_date": "2024-01-12",
            "due_date": "2024-01-02"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["code"], "date_order");
}

#[tokio::test]
async fn test_lending_for_unknown_member_not_found() {
    let app = app(seeded_store());
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/lendings",
        Some(json!({
            "book_id": 2,
            "member_id": 42,
            "borrow_date": "2024-01-12",
            "due_date": "2024-01-26"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 5);
}

#[tokio::test]
async fn test_update_lending_to_unknown_records_not_found() {
    let app = app(seeded_store());
    let (status, body) = send(
        &app,
        "PUT",
        "/api/v1/lendings/4",
        Some(json!({
            "book_id": 999,
            "member_id": 777,
            "borrow_date": "2024-01-01",
            "due_date": "2024-01-10"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 5);

    let (_, body) = send(&app, "GET", "/api/v1/lendings/4", None).await;
    assert_eq!(body["book_id"], 1);
    assert_eq!(body["member_id"], 3);

    let (_, body) = send(&app, "GET", "/api/v1/overdue", None).await;
    assert_eq!(body["page"]["items"][0]["book_title"], "Dune");
}

#[tokio::test]
async fn test_update_lending_due_date() {
    let app = app(seeded_store());
    let (status, body) = send(
        &app,
        "PUT",
        "/api/v1/lendings/4",
        Some(json!({
            "book_id": 1,
            "member_id": 3,
            "borrow_date": "2024-01-01",
            "due_date": "2024-01-20"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["due_date"], "2024-01-20");

    let (_, body) = send(&app, "GET", "/api/v1/overdue", None).await;
    assert_eq!(body["summary"]["count"], 0);
}

#[tokio::test]
async fn test_openapi_document_served() {
    let app = app(seeded_store());
    let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/lendings/{id}/return"]["post"].is_object());
    assert!(body["paths"]["/overdue"]["get"].is_object());
}

#[tokio::test]
async fn test_overdue_report() {
    let app = app(seeded_store());
    let (status, body) = send(&app, "GET", "/api/v1/overdue", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["today"], "2024-01-15");
    assert_eq!(body["summary"]["count"], 1);
    assert_eq!(body["summary"]["total_fine"].as_f64(), Some(25.0));

    let row = &body["page"]["items"][0];
    assert_eq!(row["lending_id"], 4);
    assert_eq!(row["days_overdue"], 5);
    assert_eq!(row["book_title"], "Dune");
    assert_eq!(row["member_name"], "Ann Brown");

    let (_, body) = send(&app, "GET", "/api/v1/overdue?search=emma", None).await;
    assert_eq!(body["summary"]["count"], 0);
    assert_eq!(body["page"]["items"], json!([]));
}

#[tokio::test]
async fn test_members_crud() {
    let app = app(seeded_store());

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/members",
        Some(json!({
            "full_name": "Zoe Adams",
            "joining_date": "2024-01-02",
            "email": "zoe@example.com",
            "phone_number": "+911234",
            "is_wa_applicable": false
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_i64().unwrap();

    let (_, body) = send(&app, "GET", "/api/v1/members?search=%2B91", None).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["full_name"], "Zoe Adams");

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/members",
        Some(json!({
            "full_name": "Future Member",
            "joining_date": "2024-02-01",
            "email": "future@example.com",
            "phone_number": "1"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "DELETE", &format!("/api/v1/members/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "deleted", "id": id }));

    let (status, _) = send(&app, "GET", &format!("/api/v1/members/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_lending() {
    let app = app(seeded_store());
    let (status, body) = send(&app, "DELETE", "/api/v1/lendings/4", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "deleted");

    let (_, body) = send(&app, "GET", "/api/v1/lendings", None).await;
    assert_eq!(body["total"], 0);
    assert_eq!(body["total_pages"], 1);
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_live_health_check() {
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}
