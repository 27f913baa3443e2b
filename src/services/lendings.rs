//! Lending management service

use std::cmp::Ordering;

use crate::{
    config::LendingConfig,
    engine::{rules::validate_lending, Clock, LendingEvent, OverdueEngine},
    error::{AppError, AppResult},
    models::{Book, BookStatus, Lending, LendingDraft, LendingSort, ListQuery, Page, SortOrder, ValidLending},
    repository::Repository,
};

use super::{order_or, pipeline_for};

#[derive(Clone)]
pub struct LendingsService {
    repository: Repository,
    config: LendingConfig,
    clock: Clock,
}

impl LendingsService {
    pub fn new(repository: Repository, config: LendingConfig, clock: Clock) -> Self {
        Self {
            repository,
            config,
            clock,
        }
    }

    pub async fn list_lendings(&self, query: &ListQuery<LendingSort>) -> AppResult<Page<Lending>> {
        let lendings = self.repository.lendings.list_lendings().await?;
        let sort = query.sort.unwrap_or_default();
        let order = order_or(query.order, SortOrder::Asc);

        let page = pipeline_for(query, &self.config).run(
            &lendings,
            |l| format!("{} {}", l.book_id, l.member_id),
            |a, b| compare_lendings(a, b, sort, order),
        );
        Ok(page.map(Clone::clone))
    }

    pub async fn get_lending(&self, id: i32) -> AppResult<Lending> {
        self.repository.lendings.get_lending(id).await
    }

    /// Validate and create a new lending (borrow a book)
    pub async fn create_lending(&self, mut draft: LendingDraft) -> AppResult<Lending> {
        draft.id = None;
        let valid = self.validate(&draft).await?;
        let book = self.check_references(&valid).await?;

        let lending = self.repository.lendings.create_lending(valid).await?;
        tracing::info!(
            "Lending {} created: book {} to member {} until {}",
            lending.id,
            lending.book_id,
            lending.member_id,
            lending.due_date
        );
        expected_status(&book, LendingEvent::Lent);
        Ok(lending)
    }

    /// Validate and replace an existing lending
    pub async fn update_lending(&self, id: i32, mut draft: LendingDraft) -> AppResult<Lending> {
        self.repository.lendings.get_lending(id).await?;
        draft.id = Some(id);
        let valid = self.validate(&draft).await?;
        self.check_references(&valid).await?;
        self.submit_update(id, valid).await
    }

    /// Return a lent book today.
    ///
    /// Answers the closed lending and the status the book moves to.
    pub async fn return_lending(&self, id: i32) -> AppResult<(Lending, BookStatus)> {
        let lending = self.repository.lendings.get_lending(id).await?;
        if let Some(returned) = lending.return_date {
            return Err(AppError::Conflict(format!(
                "Lending {} was already returned on {}",
                id, returned
            )));
        }

        let valid = OverdueEngine::mark_returned(&lending, self.clock.today())?;
        let book = self.repository.books.get_book(lending.book_id).await?;
        let updated = self.submit_update(id, valid).await?;
        tracing::info!("Lending {} returned (book {})", id, updated.book_id);
        Ok((updated, expected_status(&book, LendingEvent::Returned)))
    }

    pub async fn delete_lending(&self, id: i32) -> AppResult<()> {
        self.repository.lendings.delete_lending(id).await?;
        tracing::info!("Lending {} deleted", id);
        Ok(())
    }

    async fn validate(&self, draft: &LendingDraft) -> AppResult<ValidLending> {
        let lendings = self.repository.lendings.list_lendings().await?;
        let for_book: Vec<Lending> = match draft.book_id {
            Some(book_id) => lendings
                .into_iter()
                .filter(|l| l.book_id == book_id && l.is_active())
                .collect(),
            None => Vec::new(),
        };

        validate_lending(draft, &for_book).map_err(|errors| {
            tracing::debug!("Lending rejected: {}", errors);
            AppError::Validation(errors)
        })
    }

    /// The lending's book and member must exist in the store
    async fn check_references(&self, valid: &ValidLending) -> AppResult<Book> {
        let (book, _) = tokio::try_join!(
            self.repository.books.get_book(valid.book_id()),
            self.repository.members.get_member(valid.member_id())
        )?;
        Ok(book)
    }

    async fn submit_update(&self, id: i32, valid: ValidLending) -> AppResult<Lending> {
        self.repository.lendings.update_lending(id, valid).await
    }
}

/// Status the book's cached value should move to after `event`
fn expected_status(book: &Book, event: LendingEvent) -> BookStatus {
    let next = book.status.transition(event);
    if next != book.status {
        tracing::info!(
            book_id = book.id,
            from = %book.status,
            to = %next,
            "Book status changes on {:?}",
            event
        );
    }
    next
}

fn compare_lendings(a: &Lending, b: &Lending, sort: LendingSort, order: SortOrder) -> Ordering {
    let primary = match sort {
        LendingSort::BorrowDate => a.borrow_date.cmp(&b.borrow_date),
        LendingSort::DueDate => a.due_date.cmp(&b.due_date),
        // Outstanding lendings (no return date) come first
        LendingSort::ReturnDate => a.return_date.cmp(&b.return_date),
        LendingSort::Id => Ordering::Equal,
    };
    order.apply(primary).then(a.id.cmp(&b.id))
}
