//! Store contract.
//!
//! Books, members and lendings live in an external store reached through
//! plain CRUD operations. The traits below are that contract; [`HttpStore`]
//! talks to the remote REST store and [`MemoryStore`] keeps records
//! in-process.

pub mod http;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::{Book, BookDraft, Lending, Member, MemberDraft, ValidLending},
};

pub use http::HttpStore;
pub use memory::MemoryStore;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn list_books(&self) -> AppResult<Vec<Book>>;
    async fn get_book(&self, id: i32) -> AppResult<Book>;
    async fn create_book(&self, draft: BookDraft) -> AppResult<Book>;
    async fn update_book(&self, id: i32, draft: BookDraft) -> AppResult<Book>;
    async fn delete_book(&self, id: i32) -> AppResult<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberRepository: Send + Sync {
    async fn list_members(&self) -> AppResult<Vec<Member>>;
    async fn get_member(&self, id: i32) -> AppResult<Member>;
    async fn create_member(&self, draft: MemberDraft) -> AppResult<Member>;
    async fn update_member(&self, id: i32, draft: MemberDraft) -> AppResult<Member>;
    async fn delete_member(&self, id: i32) -> AppResult<()>;
}

/// Lending writes only accept [`ValidLending`]
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LendingRepository: Send + Sync {
    async fn list_lendings(&self) -> AppResult<Vec<Lending>>;
    async fn get_lending(&self, id: i32) -> AppResult<Lending>;
    async fn create_lending(&self, lending: ValidLending) -> AppResult<Lending>;
    async fn update_lending(&self, id: i32, lending: ValidLending) -> AppResult<Lending>;
    async fn delete_lending(&self, id: i32) -> AppResult<()>;
}

/// Handles to the store, one per record kind
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookRepository>,
    pub members: Arc<dyn MemberRepository>,
    pub lendings: Arc<dyn LendingRepository>,
}

impl Repository {
    /// Create a repository backed by a single store serving every record kind
    pub fn new<S>(store: S) -> Self
    where
        S: BookRepository + MemberRepository + LendingRepository + 'static,
    {
        let store = Arc::new(store);
        Self {
            books: store.clone(),
            members: store.clone(),
            lendings: store,
        }
    }

    pub fn from_parts(
        books: Arc<dyn BookRepository>,
        members: Arc<dyn MemberRepository>,
        lendings: Arc<dyn LendingRepository>,
    ) -> Self {
        Self {
            books,
            members,
            lendings,
        }
    }
}
