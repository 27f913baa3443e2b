//! Remote REST store client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    config::StoreConfig,
    error::{AppError, AppResult},
    models::{Book, BookDraft, Lending, Member, MemberDraft, ValidLending},
};

use super::{BookRepository, LendingRepository, MemberRepository};

const BOOKS: &str = "books";
const MEMBERS: &str = "members";
const LENDINGS: &str = "lendings";

/// Upper bound on list requests for one collection
const MAX_LIST_PAGES: usize = 10_000;

/// Store reached over HTTP.
///
/// Collections are served at `{base}/{collection}/` and records at
/// `{base}/{collection}/{id}`. List endpoints are capped by `limit`, so
/// listing walks `skip` until a short page comes back.
#[derive(Clone)]
pub struct HttpStore {
    client: Client,
    base_url: String,
    page_limit: usize,
}

impl HttpStore {
    pub fn new(config: &StoreConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            page_limit: config.page_limit.max(1),
        })
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}/", self.base_url, collection)
    }

    fn record_url(&self, collection: &str, id: i32) -> String {
        format!("{}/{}/{}", self.base_url, collection, id)
    }

    /// Map non-success statuses to errors, keeping the store's message
    async fn check(response: Response, what: &str) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("{} not found", what)));
        }
        Err(AppError::Store {
            status: status.as_u16(),
            message: if message.is_empty() {
                status.to_string()
            } else {
                message
            },
        })
    }

    /// Parse a response body, keeping decode failures apart from transport ones
    async fn decode<T: DeserializeOwned>(response: Response, what: &str) -> AppResult<T> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|source| AppError::Decode {
            what: what.to_string(),
            source,
        })
    }

    async fn list_all<T>(&self, collection: &str) -> AppResult<Vec<T>>
    where
        T: DeserializeOwned + PartialEq,
    {
        let url = self.collection_url(collection);
        let mut all: Vec<T> = Vec::new();
        let mut skip = 0usize;

        for _ in 0..MAX_LIST_PAGES {
            let response = self
                .client
                .get(&url)
                .query(&[("skip", skip), ("limit", self.page_limit)])
                .send()
                .await?;
            let batch: Vec<T> = Self::decode(Self::check(response, collection).await?, collection).await?;

            if repeats_first_page(&all, &batch) {
                tracing::warn!(
                    "Store ignored skip={} on {}, keeping the first {} records",
                    skip,
                    collection,
                    all.len()
                );
                return Ok(all);
            }

            let fetched = batch.len();
            all.extend(batch);
            if fetched < self.page_limit {
                tracing::debug!("Fetched {} {} from store", all.len(), collection);
                return Ok(all);
            }
            skip += fetched;
        }

        tracing::warn!(
            "Stopped listing {} after {} pages ({} records)",
            collection,
            MAX_LIST_PAGES,
            all.len()
        );
        Ok(all)
    }

    async fn get_one<T: DeserializeOwned>(&self, collection: &str, id: i32) -> AppResult<T> {
        let response = self.client.get(self.record_url(collection, id)).send().await?;
        let what = format!("{} {}", collection, id);
        Self::decode(Self::check(response, &what).await?, &what).await
    }

    async fn send<B, T>(&self, method: Method, url: String, body: &B, what: &str) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.client.request(method, url).json(body).send().await?;
        Self::decode(Self::check(response, what).await?, what).await
    }

    async fn remove(&self, collection: &str, id: i32) -> AppResult<()> {
        let response = self.client.delete(self.record_url(collection, id)).send().await?;
        let what = format!("{} {}", collection, id);
        Self::check(response, &what).await?;
        Ok(())
    }
}

/// A batch that starts like the records already collected means `skip` was ignored
fn repeats_first_page<T: PartialEq>(collected: &[T], batch: &[T]) -> bool {
    !collected.is_empty() && collected.first() == batch.first()
}

#[async_trait]
impl BookRepository for HttpStore {
    async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.list_all(BOOKS).await
    }

    async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.get_one(BOOKS, id).await
    }

    async fn create_book(&self, draft: BookDraft) -> AppResult<Book> {
        self.send(Method::POST, self.collection_url(BOOKS), &draft, "book").await
    }

    async fn update_book(&self, id: i32, draft: BookDraft) -> AppResult<Book> {
        let what = format!("books {}", id);
        self.send(Method::PUT, self.record_url(BOOKS, id), &draft, &what).await
    }

    async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.remove(BOOKS, id).await
    }
}

#[async_trait]
impl MemberRepository for HttpStore {
    async fn list_members(&self) -> AppResult<Vec<Member>> {
        self.list_all(MEMBERS).await
    }

    async fn get_member(&self, id: i32) -> AppResult<Member> {
        self.get_one(MEMBERS, id).await
    }

    async fn create_member(&self, draft: MemberDraft) -> AppResult<Member> {
        self.send(Method::POST, self.collection_url(MEMBERS), &draft, "member").await
    }

    async fn update_member(&self, id: i32, draft: MemberDraft) -> AppResult<Member> {
        let what = format!("members {}", id);
        self.send(Method::PUT, self.record_url(MEMBERS, id), &draft, &what).await
    }

    async fn delete_member(&self, id: i32) -> AppResult<()> {
        self.remove(MEMBERS, id).await
    }
}

#[async_trait]
impl LendingRepository for HttpStore {
    async fn list_lendings(&self) -> AppResult<Vec<Lending>> {
        self.list_all(LENDINGS).await
    }

    async fn get_lending(&self, id: i32) -> AppResult<Lending> {
        self.get_one(LENDINGS, id).await
    }

    async fn create_lending(&self, lending: ValidLending) -> AppResult<Lending> {
        self.send(Method::POST, self.collection_url(LENDINGS), &lending, "lending").await
    }

    async fn update_lending(&self, id: i32, lending: ValidLending) -> AppResult<Lending> {
        let what = format!("lendings {}", id);
        self.send(Method::PUT, self.record_url(LENDINGS, id), &lending, &what).await
    }

    async fn delete_lending(&self, id: i32) -> AppResult<()> {
        self.remove(LENDINGS, id).await
    }
}
