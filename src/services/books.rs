//! Catalog management service

use std::cmp::Ordering;

use validator::Validate;

use crate::{
    config::LendingConfig,
    engine::{query::compare_text, rules},
    error::AppResult,
    models::{Book, BookDraft, BookSort, BookStatus, BookView, Lending, ListQuery, Page, SortOrder},
    repository::Repository,
};

use super::{order_or, pipeline_for};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
    config: LendingConfig,
}

impl BooksService {
    pub fn new(repository: Repository, config: LendingConfig) -> Self {
        Self { repository, config }
    }

    /// Books with their derived status, after search, sort and paging
    pub async fn list_books(&self, query: &ListQuery<BookSort>) -> AppResult<Page<BookView>> {
        let views = self.views().await?;
        let sort = query.sort.unwrap_or_default();
        let order = order_or(query.order, SortOrder::Asc);

        let page = pipeline_for(query, &self.config).run(
            &views,
            |v| format!("{} {}", v.book.title, v.book.isbn),
            |a, b| compare_books(a, b, sort, order),
        );
        Ok(page.map(Clone::clone))
    }

    /// Books that can be picked for a new lending
    pub async fn available_books(&self) -> AppResult<Vec<BookView>> {
        let mut views = self.views().await?;
        views.retain(|v| v.derived_status != BookStatus::Borrowed);
        views.sort_by(|a, b| compare_books(a, b, BookSort::Title, SortOrder::Asc));
        Ok(views)
    }

    /// Get a book by ID with its derived status
    pub async fn get_book(&self, id: i32) -> AppResult<BookView> {
        let (book, lendings) = tokio::try_join!(
            self.repository.books.get_book(id),
            self.repository.lendings.list_lendings()
        )?;
        Ok(view(book, &lendings))
    }

    pub async fn create_book(&self, draft: BookDraft) -> AppResult<Book> {
        draft.validate()?;
        let book = self.repository.books.create_book(draft).await?;
        tracing::info!("Book {} created: {}", book.id, book.title);
        Ok(book)
    }

    pub async fn update_book(&self, id: i32, draft: BookDraft) -> AppResult<Book> {
        draft.validate()?;
        self.repository.books.update_book(id, draft).await
    }

    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete_book(id).await?;
        tracing::info!("Book {} deleted", id);
        Ok(())
    }

    async fn views(&self) -> AppResult<Vec<BookView>> {
        let (books, lendings) = tokio::try_join!(
            self.repository.books.list_books(),
            self.repository.lendings.list_lendings()
        )?;
        Ok(books.into_iter().map(|b| view(b, &lendings)).collect())
    }
}

fn view(book: Book, lendings: &[Lending]) -> BookView {
    let derived_status = match rules::status_drift(&book, lendings) {
        Some((stored, derived)) => {
            tracing::warn!(
                book_id = book.id,
                stored = %stored,
                derived = %derived,
                "Stored book status disagrees with lendings"
            );
            derived
        }
        None => book.status,
    };
    BookView {
        status_drift: derived_status != book.status,
        book,
        derived_status,
    }
}

fn compare_books(a: &BookView, b: &BookView, sort: BookSort, order: SortOrder) -> Ordering {
    let (a_book, b_book) = (&a.book, &b.book);
    let primary = match sort {
        BookSort::Title => compare_text(&a_book.title, &b_book.title),
        BookSort::Author => compare_text(&a_book.author, &b_book.author),
        BookSort::Published => (a_book.published_year, a_book.published_month)
            .cmp(&(b_book.published_year, b_book.published_month)),
        BookSort::Status => a.derived_status.as_str().cmp(b.derived_status.as_str()),
    };
    order.apply(primary).then(a_book.id.cmp(&b_book.id))
}
