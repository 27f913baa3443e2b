//! Lending engine behaviour over whole collections

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;

use library_admin::{
    engine::{derive_book_status, paginate, search, sort_by, validate_lending, ListPipeline, OverdueEngine},
    models::{Book, BookStatus, Lending, LendingDraft},
};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn lending(id: i32, book_id: i32, borrow: &str, due: &str, returned: Option<&str>) -> Lending {
    Lending {
        id,
        book_id,
        member_id: 1,
        borrow_date: date(borrow),
        due_date: date(due),
        return_date: returned.map(date),
    }
}

fn engine() -> OverdueEngine {
    OverdueEngine::new(Decimal::from(5))
}

#[test]
fn test_overdue_lending_is_fined_per_day() {
    let lendings = vec![lending(1, 1, "2024-01-01", "2024-01-10", None)];
    let rows = engine().compute_report(&lendings, date("2024-01-15"));

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].days_overdue, 5);
    assert_eq!(rows[0].fine, Decimal::from(25));
}

#[test]
fn test_due_today_is_not_overdue() {
    let lendings = vec![lending(1, 1, "2024-01-01", "2024-01-10", None)];
    assert!(engine().compute_report(&lendings, date("2024-01-10")).is_empty());
}

#[test]
fn test_returned_lendings_never_fined() {
    let lendings = vec![lending(1, 1, "2024-01-01", "2024-01-10", Some("2024-01-20"))];
    assert!(engine().compute_report(&lendings, date("2024-02-01")).is_empty());
}

#[test]
fn test_double_booking_then_return() {
    let book = Book {
        id: 1,
        title: "Dune".to_string(),
        author: "Frank Herbert".to_string(),
        isbn: "9780441013593".to_string(),
        published_year: 1965,
        published_month: 8,
        status: BookStatus::Borrowed,
    };
    let active = lending(1, 1, "2024-01-01", "2024-01-10", None);
    let mut lendings = vec![active.clone()];

    let second = LendingDraft {
        book_id: Some(1),
        member_id: Some(2),
        borrow_date: Some("2024-01-05".to_string()),
        due_date: Some("2024-01-19".to_string()),
        ..LendingDraft::default()
    };
    let errors = validate_lending(&second, &lendings).unwrap_err();
    assert!(errors.contains("book_unavailable"));

    let mut closing = LendingDraft::from(&active);
    closing.return_date = Some("2024-01-08".to_string());
    let valid = validate_lending(&closing, &lendings).unwrap();
    lendings[0] = Lending::from_valid(1, &valid);

    assert_eq!(derive_book_status(&book, &lendings), BookStatus::Available);
}

#[test]
fn test_report_is_monotonic_in_today() {
    let lendings = vec![
        lending(1, 1, "2024-01-01", "2024-01-10", None),
        lending(2, 2, "2024-01-03", "2024-01-17", None),
        lending(3, 3, "2024-01-02", "2024-01-05", Some("2024-01-04")),
        lending(4, 4, "2024-01-08", "2024-01-30", None),
    ];
    let engine = engine();
    let start = date("2024-01-01");

    let mut previous_total = Decimal::ZERO;
    let mut previous_days = std::collections::HashMap::new();
    for offset in 0..60 {
        let today = start + Duration::days(offset);
        let rows = engine.compute_report(&lendings, today);
        let summary = OverdueEngine::aggregate(&rows);

        assert!(summary.total_fine >= previous_total);
        for row in &rows {
            let before = previous_days.get(&row.lending_id).copied().unwrap_or(0);
            assert!(row.days_overdue >= before);
            previous_days.insert(row.lending_id, row.days_overdue);
        }
        previous_total = summary.total_fine;
    }
}

#[test]
fn test_empty_report_aggregates_to_zero() {
    for today in ["1999-12-31", "2024-02-29", "2100-01-01"] {
        let rows = engine().compute_report(&[], date(today));
        let summary = OverdueEngine::aggregate(&rows);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.total_fine, Decimal::ZERO);
    }
}

#[test]
fn test_twelve_items_in_pages_of_five() {
    let items: Vec<i32> = (1..=12).collect();

    let beyond = paginate(&items, 5, 4);
    assert!(beyond.items.is_empty());
    assert_eq!(beyond.total_pages, 3);

    let mut rebuilt = Vec::new();
    for page in 1..=paginate(&items, 5, 1).total_pages {
        let chunk = paginate(&items, 5, page);
        assert!(chunk.items.len() <= 5);
        rebuilt.extend(chunk.items);
    }
    assert_eq!(rebuilt, items);
}

#[test]
fn test_pages_rebuild_input_for_any_size() {
    let items: Vec<i32> = (0..23).collect();
    for size in 1..=25 {
        let pages = paginate(&items, size, 1).total_pages;
        let rebuilt: Vec<i32> = (1..=pages).flat_map(|p| paginate(&items, size, p).items).collect();
        assert_eq!(rebuilt, items, "page size {}", size);
    }
}

#[test]
fn test_pipeline_reapplied_to_its_page_is_stable() {
    let names = vec![
        "Ann Brown", "anna Smith", "Bob Lee", "Hannah Ng", "Joanna Ray", "Zoe Adams", "Annie Hall",
    ];
    let pipeline = ListPipeline::new("ann", 1, 3);
    let first = pipeline.run(&names, |n| n.to_string(), |a, b| a.to_lowercase().cmp(&b.to_lowercase()));
    let page: Vec<&str> = first.items.iter().map(|n| **n).collect();

    let again = pipeline.run(&page, |n| n.to_string(), |a, b| a.to_lowercase().cmp(&b.to_lowercase()));
    let repeated: Vec<&str> = again.items.iter().map(|n| **n).collect();
    assert_eq!(repeated, page);
}

#[test]
fn test_search_then_sort_keeps_matches_only() {
    let titles = vec!["Emma", "Dune", "Dune Messiah", "Ulysses"];
    let found = search(&titles, "dune", |t| t.to_string());
    let sorted = sort_by(found, |a, b| b.cmp(a));
    assert_eq!(sorted, vec![&"Dune Messiah", &"Dune"]);
}
