//! Fixed-size page slicing with page-number clamping.
//!
//! An empty input is its own state ([`Listing::Empty`]) rather than
//! "page 1 of 0". A requested page past the end resets to page 1 and is
//! flagged with `page_reset` so callers can rewrite their URL.

use serde::Serialize;

/// Pages shown without ellipses in the page strip.
const MAX_PLAIN_SLOTS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "page", rename_all = "snake_case")]
pub enum PageSlot {
    Page(usize),
    Ellipsis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Listing<T> {
    Empty,
    Page(Page<T>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// Rows of the effective page.
    pub items: Vec<T>,
    /// Effective 1-based page number.
    pub page: usize,
    pub per_page: usize,
    /// Size of the whole filtered set.
    pub total_items: usize,
    pub total_pages: usize,
    /// Set when the requested page was out of range and page 1 was served.
    pub page_reset: bool,
    pub slots: Vec<PageSlot>,
}

impl<T> Listing<T> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Listing::Empty)
    }

    pub fn items(&self) -> &[T] {
        match self {
            Listing::Empty => &[],
            Listing::Page(page) => &page.items,
        }
    }

    pub fn page(&self) -> Option<&Page<T>> {
        match self {
            Listing::Empty => None,
            Listing::Page(page) => Some(page),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Listing<U> {
        match self {
            Listing::Empty => Listing::Empty,
            Listing::Page(page) => Listing::Page(Page {
                items: page.items.into_iter().map(f).collect(),
                page: page.page,
                per_page: page.per_page,
                total_items: page.total_items,
                total_pages: page.total_pages,
                page_reset: page.page_reset,
                slots: page.slots,
            }),
        }
    }
}

/// Pages needed for `total_items`; zero when there is nothing to show.
pub fn total_pages(total_items: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    total_items.div_ceil(per_page)
}

/// Effective page for a request: `0` reads as `1`, anything past the last
/// page resets to `1`. Returns `(page, was_reset)`; `None` for no pages.
pub fn resolve_page(requested: usize, total_pages: usize) -> Option<(usize, bool)> {
    if total_pages == 0 {
        return None;
    }
    let requested = requested.max(1);
    if requested > total_pages {
        Some((1, true))
    } else {
        Some((requested, false))
    }
}

/// Slices one page of `items`, resolving `requested` with [`resolve_page`].
pub fn paginate<T: Clone>(items: &[T], requested: usize, per_page: usize) -> Listing<T> {
    let total_pages = total_pages(items.len(), per_page);
    let Some((page, page_reset)) = resolve_page(requested, total_pages) else {
        return Listing::Empty;
    };

    let start = (page - 1) * per_page;
    let end = (start + per_page).min(items.len());
    Listing::Page(Page {
        items: items[start..end].to_vec(),
        page,
        per_page,
        total_items: items.len(),
        total_pages,
        page_reset,
        slots: page_slots(page, total_pages),
    })
}

/// Page-number strip for the pager.
pub fn page_slots(current: usize, total_pages: usize) -> Vec<PageSlot> {
    use PageSlot::{Ellipsis, Page};

    if total_pages <= MAX_PLAIN_SLOTS {
        return (1..=total_pages).map(Page).collect();
    }
    let current = current.clamp(1, total_pages);
    let last = total_pages;

    if current <= 3 {
        vec![Page(1), Page(2), Page(3), Page(4), Page(5), Ellipsis, Page(last)]
    } else if current >= last - 2 {
        vec![
            Page(1),
            Ellipsis,
            Page(last - 4),
            Page(last - 3),
            Page(last - 2),
            Page(last - 1),
            Page(last),
        ]
    } else {
        vec![
            Page(1),
            Ellipsis,
            Page(current - 1),
            Page(current),
            Page(current + 1),
            Ellipsis,
            Page(last),
        ]
    }
}
