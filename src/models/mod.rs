//! Data models for the library administration backend

pub mod book;
pub mod enums;
pub mod lending;
pub mod member;
pub mod overdue;
pub mod query;

// Re-export commonly used types
pub use book::{Book, BookDraft, BookView};
pub use enums::{BookSort, BookStatus, LendingSort, MemberSort, OverdueSort, SortOrder};
pub use lending::{Lending, LendingDraft, ValidLending};
pub use member::{Member, MemberDraft};
pub use overdue::{OverdueEntry, OverdueRow, OverdueSummary};
pub use query::{ListQuery, Page};
