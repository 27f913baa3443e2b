//! Lending (borrow) model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lending record as held by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Lending {
    pub id: i32,
    pub book_id: i32,
    pub member_id: i32,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
    /// `None` while the book is still out
    #[serde(default)]
    pub return_date: Option<NaiveDate>,
}

impl Lending {
    /// An active lending is one that has not been returned yet
    pub fn is_active(&self) -> bool {
        self.return_date.is_none()
    }

    pub fn from_valid(id: i32, valid: &ValidLending) -> Self {
        Self {
            id,
            book_id: valid.book_id,
            member_id: valid.member_id,
            borrow_date: valid.borrow_date,
            due_date: valid.due_date,
            return_date: valid.return_date,
        }
    }
}

/// Unvalidated lending candidate, as submitted by a form.
///
/// Dates are kept as raw strings so that unparseable input can be reported
/// instead of rejected at deserialization. Empty strings count as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct LendingDraft {
    /// Set when the draft updates an existing lending
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub book_id: Option<i32>,
    #[serde(default)]
    pub member_id: Option<i32>,
    #[serde(default)]
    pub borrow_date: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub return_date: Option<String>,
}

impl From<&Lending> for LendingDraft {
    fn from(lending: &Lending) -> Self {
        Self {
            id: Some(lending.id),
            book_id: Some(lending.book_id),
            member_id: Some(lending.member_id),
            borrow_date: Some(lending.borrow_date.to_string()),
            due_date: Some(lending.due_date.to_string()),
            return_date: lending.return_date.map(|d| d.to_string()),
        }
    }
}

/// Lending that passed the lending rules.
///
/// Only the engine builds these; it is the one value the services hand to the
/// store's create and update operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidLending {
    #[serde(skip)]
    lending_id: Option<i32>,
    book_id: i32,
    member_id: i32,
    borrow_date: NaiveDate,
    due_date: NaiveDate,
    return_date: Option<NaiveDate>,
}

impl ValidLending {
    pub(crate) fn new(
        lending_id: Option<i32>,
        book_id: i32,
        member_id: i32,
        borrow_date: NaiveDate,
        due_date: NaiveDate,
        return_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            lending_id,
            book_id,
            member_id,
            borrow_date,
            due_date,
            return_date,
        }
    }

    /// Id of the lending this value updates, `None` for a new lending
    pub fn lending_id(&self) -> Option<i32> {
        self.lending_id
    }

    pub fn book_id(&self) -> i32 {
        self.book_id
    }

    pub fn member_id(&self) -> i32 {
        self.member_id
    }

    pub fn borrow_date(&self) -> NaiveDate {
        self.borrow_date
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    pub fn return_date(&self) -> Option<NaiveDate> {
        self.return_date
    }
}
