//! Generic search, sort and paginate over in-memory collections.
//!
//! The stages always run in that order: [`search`], then [`sort_by`], then
//! [`paginate`]. [`ListPipeline`] bundles the three so list code cannot
//! reorder them.

use std::cmp::Ordering;

use crate::models::Page;

/// Items whose projection contains `needle`, ignoring case, in input order.
///
/// The needle is matched as typed, surrounding spaces included. An empty
/// needle keeps every item.
pub fn search<'a, T, P>(items: &'a [T], needle: &str, projection: P) -> Vec<&'a T>
where
    P: Fn(&T) -> String,
{
    let needle = needle.to_lowercase();
    items
        .iter()
        .filter(|item| needle.is_empty() || projection(*item).to_lowercase().contains(&needle))
        .collect()
}

/// Stable sort: items the comparator ties keep their input order
pub fn sort_by<T, C>(mut items: Vec<T>, compare: C) -> Vec<T>
where
    C: FnMut(&T, &T) -> Ordering,
{
    items.sort_by(compare);
    items
}

/// Number of pages for `len` items, at least one
pub fn total_pages(len: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    len.div_ceil(page_size).max(1)
}

/// One page of `items`; pages are numbered from 1.
///
/// Out-of-range page numbers give an empty page rather than an error. A zero
/// page size is treated as 1.
pub fn paginate<T: Clone>(items: &[T], page_size: usize, page: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(items.len(), page_size);
    let page_items = if page == 0 {
        Vec::new()
    } else {
        items
            .chunks(page_size)
            .nth(page - 1)
            .map(<[T]>::to_vec)
            .unwrap_or_default()
    };

    Page {
        items: page_items,
        total: items.len(),
        page,
        per_page: page_size,
        total_pages,
    }
}

/// Search, sort and page parameters of one list request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPipeline {
    pub search: String,
    pub page: usize,
    pub page_size: usize,
}

impl ListPipeline {
    pub fn new(search: impl Into<String>, page: usize, page_size: usize) -> Self {
        Self {
            search: search.into(),
            page,
            page_size,
        }
    }

    /// Run search → sort → paginate over `items`
    pub fn run<'a, T, P, C>(&self, items: &'a [T], projection: P, compare: C) -> Page<&'a T>
    where
        P: Fn(&T) -> String,
        C: Fn(&T, &T) -> Ordering,
    {
        let found = search(items, &self.search, projection);
        let sorted = sort_by(found, |a, b| compare(*a, *b));
        paginate(&sorted, self.page_size, self.page)
    }
}

/// Case-insensitive string comparison used by text sort keys
pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}
