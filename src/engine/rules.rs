//! Lending rules: candidate validation and the book status machine

use chrono::NaiveDate;

use crate::{
    error::{ValidationError, ValidationErrors},
    models::{Book, BookStatus, Lending, LendingDraft, ValidLending},
};

use super::dates::{is_before, parse_date};

/// Validate a lending candidate against a snapshot of the lendings of its book.
///
/// `active_lendings_for_book` may contain any lendings; only the unreturned
/// ones for the candidate's book are considered. The snapshot is advisory:
/// the store may have moved on by the time the write lands.
pub fn validate_lending(
    candidate: &LendingDraft,
    active_lendings_for_book: &[Lending],
) -> Result<ValidLending, ValidationErrors> {
    let mut errors = Vec::new();

    let book_id = required_id("book_id", candidate.book_id, &mut errors);
    let member_id = required_id("member_id", candidate.member_id, &mut errors);
    let borrow_date = required_date("borrow_date", candidate.borrow_date.as_deref(), &mut errors);
    let due_date = required_date("due_date", candidate.due_date.as_deref(), &mut errors);
    let return_date = match present(candidate.return_date.as_deref()) {
        Some(raw) => match parse_date("return_date", raw) {
            Ok(date) => Some(date),
            Err(e) => {
                errors.push(e);
                None
            }
        },
        None => None,
    };

    if let Some(borrow) = borrow_date {
        if let Some(due) = due_date {
            if is_before(due, borrow) {
                errors.push(ValidationError::DateOrder {
                    field: "due_date",
                    date: due,
                    borrow_date: borrow,
                });
            }
        }
        if let Some(returned) = return_date {
            if is_before(returned, borrow) {
                errors.push(ValidationError::DateOrder {
                    field: "return_date",
                    date: returned,
                    borrow_date: borrow,
                });
            }
        }
    }

    if let Some(book_id) = book_id {
        if let Some(active) = conflicting_lending(book_id, candidate.id, active_lendings_for_book) {
            errors.push(ValidationError::BookUnavailable {
                book_id,
                active_lending_id: active.id,
            });
        }
    }

    match (book_id, member_id, borrow_date, due_date) {
        (Some(book_id), Some(member_id), Some(borrow_date), Some(due_date)) if errors.is_empty() => {
            Ok(ValidLending::new(
                candidate.id,
                book_id,
                member_id,
                borrow_date,
                due_date,
                return_date,
            ))
        }
        _ => Err(ValidationErrors(errors)),
    }
}

/// Active lending of `book_id` that is not the candidate itself
fn conflicting_lending(
    book_id: i32,
    candidate_id: Option<i32>,
    lendings: &[Lending],
) -> Option<&Lending> {
    lendings
        .iter()
        .find(|l| l.book_id == book_id && l.is_active() && Some(l.id) != candidate_id)
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn required_id(field: &'static str, value: Option<i32>, errors: &mut Vec<ValidationError>) -> Option<i32> {
    if value.is_none() {
        errors.push(ValidationError::MissingField { field });
    }
    value
}

fn required_date(
    field: &'static str,
    value: Option<&str>,
    errors: &mut Vec<ValidationError>,
) -> Option<NaiveDate> {
    match present(value) {
        None => {
            errors.push(ValidationError::MissingField { field });
            None
        }
        Some(raw) => match parse_date(field, raw) {
            Ok(date) => Some(date),
            Err(e) => {
                errors.push(e);
                None
            }
        },
    }
}

/// Status of `book` given the lendings currently known.
///
/// An active lending makes the book `borrowed`. Otherwise the stored status
/// is kept, except a stale `borrowed` which falls back to `available`.
/// `reserved` is never produced here.
pub fn derive_book_status(book: &Book, lendings: &[Lending]) -> BookStatus {
    let has_active = lendings.iter().any(|l| l.book_id == book.id && l.is_active());
    if has_active {
        return BookStatus::Borrowed;
    }
    match book.status {
        BookStatus::Borrowed => BookStatus::Available,
        other => other,
    }
}

/// Stored and derived status, when they disagree
pub fn status_drift(book: &Book, lendings: &[Lending]) -> Option<(BookStatus, BookStatus)> {
    let derived = derive_book_status(book, lendings);
    (derived != book.status).then_some((book.status, derived))
}

/// Lending-side events that move a book between states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LendingEvent {
    /// A validated lending for the book was created
    Lent,
    /// The book's active lending received a return date
    Returned,
}

impl BookStatus {
    /// Apply a lending event. `reserved` is only left by lending it out.
    pub fn transition(self, event: LendingEvent) -> BookStatus {
        match (self, event) {
            (_, LendingEvent::Lent) => BookStatus::Borrowed,
            (BookStatus::Borrowed, LendingEvent::Returned) => BookStatus::Available,
            (other, LendingEvent::Returned) => other,
        }
    }
}
