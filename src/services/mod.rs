//! Business logic services

pub mod books;
pub mod lendings;
pub mod members;
pub mod overdue;

use crate::{
    config::LendingConfig,
    engine::{Clock, ListPipeline, OverdueEngine},
    models::{ListQuery, SortOrder},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BooksService,
    pub members: members::MembersService,
    pub lendings: lendings::LendingsService,
    pub overdue: overdue::OverdueService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, lending_config: LendingConfig, clock: Clock) -> Self {
        let engine = OverdueEngine::new(lending_config.fine_per_day);
        Self {
            books: books::BooksService::new(repository.clone(), lending_config.clone()),
            members: members::MembersService::new(repository.clone(), lending_config.clone(), clock),
            lendings: lendings::LendingsService::new(repository.clone(), lending_config.clone(), clock),
            overdue: overdue::OverdueService::new(repository, lending_config, engine, clock),
        }
    }
}

/// Pipeline parameters of a list request, with configured page defaults
pub(crate) fn pipeline_for<S>(query: &ListQuery<S>, config: &LendingConfig) -> ListPipeline {
    ListPipeline::new(
        query.search.clone().unwrap_or_default(),
        query.page.unwrap_or(1),
        config.page_size(query.per_page),
    )
}

pub(crate) fn order_or(query_order: Option<SortOrder>, default: SortOrder) -> SortOrder {
    query_order.unwrap_or(default)
}
