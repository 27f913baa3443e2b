//! Book (catalog) model and related types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::enums::BookStatus;

/// Book record as held by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub published_year: i32,
    pub published_month: u32,
    #[serde(default)]
    pub status: BookStatus,
}

/// Create or replace book request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct BookDraft {
    #[validate(length(min = 3, max = 250, message = "Title must be between 3 and 250 characters"))]
    pub title: String,
    #[validate(length(min = 3, max = 250, message = "Author must be between 3 and 250 characters"))]
    pub author: String,
    #[validate(length(min = 3, max = 20, message = "ISBN must be between 3 and 20 characters"))]
    pub isbn: String,
    #[validate(range(min = 1500, message = "Year must be after 1500"))]
    pub published_year: i32,
    #[validate(range(min = 1, max = 12, message = "Month must be between 1 and 12"))]
    pub published_month: u32,
    #[serde(default)]
    pub status: BookStatus,
}

impl Book {
    /// Build the stored record from a draft and a store-assigned id
    pub fn from_draft(id: i32, draft: BookDraft) -> Self {
        Self {
            id,
            title: draft.title,
            author: draft.author,
            isbn: draft.isbn,
            published_year: draft.published_year,
            published_month: draft.published_month,
            status: draft.status,
        }
    }
}

/// Book as shown in lists: stored status next to the one derived from lendings
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookView {
    #[serde(flatten)]
    pub book: Book,
    pub derived_status: BookStatus,
    /// Stored status disagrees with the active lendings
    pub status_drift: bool,
}
