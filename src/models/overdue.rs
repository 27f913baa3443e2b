//! Overdue report rows (derived, never stored)

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

/// One overdue lending with its fine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct OverdueRow {
    pub lending_id: i32,
    pub book_id: i32,
    pub member_id: i32,
    pub due_date: NaiveDate,
    pub days_overdue: i64,
    #[schema(value_type = f64)]
    pub fine: Decimal,
}

/// Count and total fine over a set of overdue rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ToSchema)]
pub struct OverdueSummary {
    pub count: usize,
    #[schema(value_type = f64)]
    pub total_fine: Decimal,
}

/// Overdue row with the titles and names resolved for display
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OverdueEntry {
    #[serde(flatten)]
    pub row: OverdueRow,
    pub book_title: Option<String>,
    pub member_name: Option<String>,
}
