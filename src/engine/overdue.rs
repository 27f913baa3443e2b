//! Overdue classification and fines

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    error::{ValidationError, ValidationErrors},
    models::{Lending, OverdueRow, OverdueSummary, ValidLending},
};

use super::dates::{days_overdue, is_before};

/// Derives overdue rows and fines from a lending snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverdueEngine {
    fine_per_day: Decimal,
}

impl OverdueEngine {
    pub fn new(fine_per_day: Decimal) -> Self {
        Self { fine_per_day }
    }

    pub fn fine_per_day(&self) -> Decimal {
        self.fine_per_day
    }

    /// Fine owed for a number of overdue days
    pub fn fine_for(&self, days_overdue: i64) -> Decimal {
        Decimal::from(days_overdue) * self.fine_per_day
    }

    /// Whether `lending` is unreturned and due strictly before `today`
    pub fn is_overdue(lending: &Lending, today: NaiveDate) -> bool {
        lending.is_active() && is_before(lending.due_date, today)
    }

    /// Overdue rows for `lendings`, in input order
    pub fn compute_report(&self, lendings: &[Lending], today: NaiveDate) -> Vec<OverdueRow> {
        lendings
            .iter()
            .filter(|l| Self::is_overdue(l, today))
            .map(|l| {
                let days = days_overdue(l.due_date, today);
                OverdueRow {
                    lending_id: l.id,
                    book_id: l.book_id,
                    member_id: l.member_id,
                    due_date: l.due_date,
                    days_overdue: days,
                    fine: self.fine_for(days),
                }
            })
            .collect()
    }

    /// Row count and fine total
    pub fn aggregate<'a, I>(rows: I) -> OverdueSummary
    where
        I: IntoIterator<Item = &'a OverdueRow>,
    {
        rows.into_iter().fold(OverdueSummary::default(), |acc, row| OverdueSummary {
            count: acc.count + 1,
            total_fine: acc.total_fine + row.fine,
        })
    }

    /// Close `lending` with `today` as its return date.
    ///
    /// Produces the record to submit; nothing is persisted and the report is
    /// not touched. Fails when `today` precedes the borrow date.
    pub fn mark_returned(lending: &Lending, today: NaiveDate) -> Result<ValidLending, ValidationErrors> {
        if is_before(today, lending.borrow_date) {
            return Err(ValidationError::DateOrder {
                field: "return_date",
                date: today,
                borrow_date: lending.borrow_date,
            }
            .into());
        }
        Ok(ValidLending::new(
            Some(lending.id),
            lending.book_id,
            lending.member_id,
            lending.borrow_date,
            lending.due_date,
            Some(today),
        ))
    }
}
