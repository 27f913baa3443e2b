//! Library member model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Member record as held by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Member {
    pub id: i32,
    pub full_name: String,
    pub joining_date: NaiveDate,
    pub email: String,
    pub phone_number: String,
    #[serde(rename = "is_wa_applicable", default)]
    pub is_whatsapp_applicable: bool,
}

/// Create or replace member request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct MemberDraft {
    #[validate(length(min = 3, max = 250, message = "Name must be between 3 and 250 characters"))]
    pub full_name: String,
    /// Must not lie in the future; checked against the reference clock
    pub joining_date: NaiveDate,
    #[validate(
        email(message = "Invalid email format"),
        length(max = 50, message = "Email must be at most 50 characters")
    )]
    pub email: String,
    #[validate(length(min = 1, max = 50, message = "Phone number must be between 1 and 50 characters"))]
    pub phone_number: String,
    #[serde(rename = "is_wa_applicable", default)]
    pub is_whatsapp_applicable: bool,
}

impl Member {
    pub fn from_draft(id: i32, draft: MemberDraft) -> Self {
        Self {
            id,
            full_name: draft.full_name,
            joining_date: draft.joining_date,
            email: draft.email,
            phone_number: draft.phone_number,
            is_whatsapp_applicable: draft.is_whatsapp_applicable,
        }
    }
}
