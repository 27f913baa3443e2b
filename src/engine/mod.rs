//! Lending domain engine.
//!
//! Pure, synchronous functions over borrowed snapshots of the store's
//! collections. Nothing here performs I/O or keeps state between calls.

pub mod dates;
pub mod overdue;
pub mod query;
pub mod rules;

pub use dates::Clock;
pub use overdue::OverdueEngine;
pub use query::{paginate, search, sort_by, ListPipeline};
pub use rules::{derive_book_status, validate_lending, LendingEvent};
