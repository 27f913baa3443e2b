//! Overdue report service

use std::{cmp::Ordering, collections::HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    config::LendingConfig,
    engine::{paginate, search, sort_by, Clock, OverdueEngine},
    error::AppResult,
    models::{ListQuery, OverdueEntry, OverdueSort, OverdueSummary, Page, SortOrder},
    repository::Repository,
};

use super::{order_or, pipeline_for};

/// Overdue report: totals over the searched rows plus the requested page
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OverdueReport {
    pub today: NaiveDate,
    #[schema(value_type = f64)]
    pub fine_per_day: Decimal,
    pub summary: OverdueSummary,
    pub page: Page<OverdueEntry>,
}

#[derive(Clone)]
pub struct OverdueService {
    repository: Repository,
    config: LendingConfig,
    engine: OverdueEngine,
    clock: Clock,
}

impl OverdueService {
    pub fn new(repository: Repository, config: LendingConfig, engine: OverdueEngine, clock: Clock) -> Self {
        Self {
            repository,
            config,
            engine,
            clock,
        }
    }

    /// Build the overdue report for today
    pub async fn report(&self, query: &ListQuery<OverdueSort>) -> AppResult<OverdueReport> {
        let (lendings, books, members) = tokio::try_join!(
            self.repository.lendings.list_lendings(),
            self.repository.books.list_books(),
            self.repository.members.list_members()
        )?;

        let today = self.clock.today();
        let titles: HashMap<i32, String> = books.into_iter().map(|b| (b.id, b.title)).collect();
        let names: HashMap<i32, String> = members.into_iter().map(|m| (m.id, m.full_name)).collect();

        let entries: Vec<OverdueEntry> = self
            .engine
            .compute_report(&lendings, today)
            .into_iter()
            .map(|row| OverdueEntry {
                book_title: titles.get(&row.book_id).cloned(),
                member_name: names.get(&row.member_id).cloned(),
                row,
            })
            .collect();

        let pipeline = pipeline_for(query, &self.config);
        let sort = query.sort.unwrap_or_default();
        let order = order_or(query.order, SortOrder::Desc);

        let found = search(&entries, &pipeline.search, |e| {
            format!(
                "{} {} {}",
                e.row.lending_id,
                e.book_title.as_deref().unwrap_or_default(),
                e.member_name.as_deref().unwrap_or_default()
            )
        });
        let summary = OverdueEngine::aggregate(found.iter().map(|e| &e.row));
        let sorted = sort_by(found, |a, b| compare_entries(a, b, sort, order));
        let page = paginate(&sorted, pipeline.page_size, pipeline.page).map(|e| e.clone());

        tracing::debug!(
            "Overdue report for {}: {} rows, total fine {}",
            today,
            summary.count,
            summary.total_fine
        );

        Ok(OverdueReport {
            today,
            fine_per_day: self.engine.fine_per_day(),
            summary,
            page,
        })
    }
}

fn compare_entries(a: &OverdueEntry, b: &OverdueEntry, sort: OverdueSort, order: SortOrder) -> Ordering {
    let primary = match sort {
        OverdueSort::Days => a.row.days_overdue.cmp(&b.row.days_overdue),
        OverdueSort::Fine => a.row.fine.cmp(&b.row.fine),
        OverdueSort::DueDate => a.row.due_date.cmp(&b.row.due_date),
    };
    order.apply(primary).then(a.row.lending_id.cmp(&b.row.lending_id))
}
