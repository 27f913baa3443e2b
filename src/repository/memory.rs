//! In-process store, used for offline runs and tests

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookDraft, Lending, Member, MemberDraft, ValidLending},
};

use super::{BookRepository, LendingRepository, MemberRepository};

#[derive(Default)]
struct Tables {
    books: BTreeMap<i32, Book>,
    members: BTreeMap<i32, Member>,
    lendings: BTreeMap<i32, Lending>,
    last_id: i32,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }
}

/// Store keeping every record in memory; ids are assigned from one sequence
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with existing records (ids are kept)
    pub fn with_records(books: Vec<Book>, members: Vec<Member>, lendings: Vec<Lending>) -> Self {
        let last_id = books
            .iter()
            .map(|b| b.id)
            .chain(members.iter().map(|m| m.id))
            .chain(lendings.iter().map(|l| l.id))
            .max()
            .unwrap_or(0);

        Self {
            tables: RwLock::new(Tables {
                books: books.into_iter().map(|b| (b.id, b)).collect(),
                members: members.into_iter().map(|m| (m.id, m)).collect(),
                lendings: lendings.into_iter().map(|l| (l.id, l)).collect(),
                last_id,
            }),
        }
    }
}

fn not_found(kind: &str, id: i32) -> AppError {
    AppError::NotFound(format!("{} with id {} not found", kind, id))
}

#[async_trait]
impl BookRepository for MemoryStore {
    async fn list_books(&self) -> AppResult<Vec<Book>> {
        Ok(self.tables.read().await.books.values().cloned().collect())
    }

    async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.tables
            .read()
            .await
            .books
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found("Book", id))
    }

    async fn create_book(&self, draft: BookDraft) -> AppResult<Book> {
        let mut tables = self.tables.write().await;
        if tables.books.values().any(|b| b.isbn == draft.isbn) {
            return Err(AppError::Store {
                status: 400,
                message: format!("ISBN {} already exists", draft.isbn),
            });
        }
        let id = tables.next_id();
        let book = Book::from_draft(id, draft);
        tables.books.insert(id, book.clone());
        Ok(book)
    }

    async fn update_book(&self, id: i32, draft: BookDraft) -> AppResult<Book> {
        let mut tables = self.tables.write().await;
        let slot = tables.books.get_mut(&id).ok_or_else(|| not_found("Book", id))?;
        *slot = Book::from_draft(id, draft);
        Ok(slot.clone())
    }

    async fn delete_book(&self, id: i32) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        tables.books.remove(&id).ok_or_else(|| not_found("Book", id))?;
        // lendings reference books with cascading delete
        tables.lendings.retain(|_, l| l.book_id != id);
        Ok(())
    }
}

#[async_trait]
impl MemberRepository for MemoryStore {
    async fn list_members(&self) -> AppResult<Vec<Member>> {
        Ok(self.tables.read().await.members.values().cloned().collect())
    }

    async fn get_member(&self, id: i32) -> AppResult<Member> {
        self.tables
            .read()
            .await
            .members
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found("Member", id))
    }

    async fn create_member(&self, draft: MemberDraft) -> AppResult<Member> {
        let mut tables = self.tables.write().await;
        if tables.members.values().any(|m| m.email == draft.email) {
            return Err(AppError::Store {
                status: 400,
                message: format!("Email {} already exists", draft.email),
            });
        }
        let id = tables.next_id();
        let member = Member::from_draft(id, draft);
        tables.members.insert(id, member.clone());
        Ok(member)
    }

    async fn update_member(&self, id: i32, draft: MemberDraft) -> AppResult<Member> {
        let mut tables = self.tables.write().await;
        let slot = tables.members.get_mut(&id).ok_or_else(|| not_found("Member", id))?;
        *slot = Member::from_draft(id, draft);
        Ok(slot.clone())
    }

    async fn delete_member(&self, id: i32) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        tables.members.remove(&id).ok_or_else(|| not_found("Member", id))?;
        tables.lendings.retain(|_, l| l.member_id != id);
        Ok(())
    }
}

#[async_trait]
impl LendingRepository for MemoryStore {
    async fn list_lendings(&self) -> AppResult<Vec<Lending>> {
        Ok(self.tables.read().await.lendings.values().cloned().collect())
    }

    async fn get_lending(&self, id: i32) -> AppResult<Lending> {
        self.tables
            .read()
            .await
            .lendings
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found("Lending", id))
    }

    async fn create_lending(&self, lending: ValidLending) -> AppResult<Lending> {
        let mut tables = self.tables.write().await;
        let id = tables.next_id();
        let created = Lending::from_valid(id, &lending);
        tables.lendings.insert(id, created.clone());
        Ok(created)
    }

    async fn update_lending(&self, id: i32, lending: ValidLending) -> AppResult<Lending> {
        let mut tables = self.tables.write().await;
        let slot = tables.lendings.get_mut(&id).ok_or_else(|| not_found("Lending", id))?;
        *slot = Lending::from_valid(id, &lending);
        Ok(slot.clone())
    }

    async fn delete_lending(&self, id: i32) -> AppResult<()> {
        self.tables
            .write()
            .await
            .lendings
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found("Lending", id))
    }
}
