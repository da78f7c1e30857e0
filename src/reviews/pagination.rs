//! Page arithmetic between client pages and source pages.
//!
//! The review service serves fixed-size source pages while the browser shows
//! smaller client pages. A source page always holds a whole number of client
//! pages, so every source page boundary is also a client page boundary and the
//! window of a client page within its source block is exact.
//!
//! All indices are 1-based. The free functions are pure; [`PageSizeConfig`]
//! bundles a validated pair of sizes and delegates to them.

use std::num::NonZeroU32;
use std::ops::Range;

use super::error::ReviewSourceError;

/// Default number of reviews on one client page.
pub const DEFAULT_CLIENT_PAGE_SIZE: u32 = 6;
/// Default number of reviews on one source page.
pub const DEFAULT_SOURCE_PAGE_SIZE: u32 = 24;

const _: () = assert!(
    DEFAULT_CLIENT_PAGE_SIZE > 0
        && matches!(
            DEFAULT_SOURCE_PAGE_SIZE.checked_rem(DEFAULT_CLIENT_PAGE_SIZE),
            Some(0)
        ),
    "default source page size must be a multiple of the client page size"
);

const DEFAULT_RATIO: u32 = match DEFAULT_SOURCE_PAGE_SIZE.checked_div(DEFAULT_CLIENT_PAGE_SIZE) {
    Some(ratio) => ratio,
    None => 1,
};

/// Offset and length of a client page within its source page block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Index of the first record of the client page within the block.
    pub offset: u32,
    /// Number of records on a full client page.
    pub len: u32,
}

impl PageWindow {
    /// Returns the exclusive end index of the window.
    #[must_use]
    pub const fn end(&self) -> u32 {
        self.offset.saturating_add(self.len)
    }

    /// Returns the window as a range clipped to a block of `block_len` records.
    ///
    /// The last page of a result set is usually shorter than a full client
    /// page; clipping yields the remainder instead of running past the block.
    #[must_use]
    pub fn clipped_range(&self, block_len: usize) -> Range<usize> {
        let start = (self.offset as usize).min(block_len);
        let end = (self.end() as usize).min(block_len);
        start..end
    }
}

/// Returns the source page that holds `client_page`.
///
/// Computes `ceil(client_page / ratio)`, where `ratio` is the number of client
/// pages per source page.
///
/// # Example
///
/// ```
/// use std::num::NonZeroU32;
///
/// use forkful::reviews::pagination::source_page_for;
///
/// let ratio = NonZeroU32::new(4).expect("non-zero");
/// assert_eq!(source_page_for(5, ratio), 2);
/// assert_eq!(source_page_for(8, ratio), 2);
/// assert_eq!(source_page_for(9, ratio), 3);
/// ```
#[must_use]
pub const fn source_page_for(client_page: u32, ratio: NonZeroU32) -> u32 {
    client_page.div_ceil(ratio.get())
}

/// Returns the window of `client_page` within its source page block.
///
/// `offset = ((client_page - 1) mod ratio) * client_page_size` and the length
/// is always `client_page_size`.
#[must_use]
pub const fn window_offset_for(
    client_page: u32,
    ratio: NonZeroU32,
    client_page_size: NonZeroU32,
) -> PageWindow {
    let slot = client_page.saturating_sub(1).rem_euclid(ratio.get());
    PageWindow {
        offset: slot.saturating_mul(client_page_size.get()),
        len: client_page_size.get(),
    }
}

/// Returns the number of client pages needed for `total_count` records.
///
/// Zero records yield zero pages.
#[must_use]
pub fn max_client_page(total_count: u64, client_page_size: NonZeroU32) -> u32 {
    pages_for(total_count, client_page_size)
}

/// Returns the number of source pages needed for `total_count` records.
#[must_use]
pub fn max_source_page(total_count: u64, source_page_size: NonZeroU32) -> u32 {
    pages_for(total_count, source_page_size)
}

fn pages_for(total_count: u64, page_size: NonZeroU32) -> u32 {
    let pages = total_count.div_ceil(u64::from(page_size.get()));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

const fn non_zero_or_min(value: u32) -> NonZeroU32 {
    match NonZeroU32::new(value) {
        Some(size) => size,
        None => NonZeroU32::MIN,
    }
}

/// Validated pair of client and source page sizes.
///
/// The source page size is always a positive multiple of the client page
/// size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSizeConfig {
    client_page_size: NonZeroU32,
    source_page_size: NonZeroU32,
    ratio: NonZeroU32,
}

impl PageSizeConfig {
    /// Validates and creates a page size pair.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewSourceError::InvalidPageSizes`] when either size is
    /// zero or the source page size is not a multiple of the client page
    /// size.
    pub fn new(client_page_size: u32, source_page_size: u32) -> Result<Self, ReviewSourceError> {
        let invalid = || ReviewSourceError::InvalidPageSizes {
            client_page_size,
            source_page_size,
        };

        let client = NonZeroU32::new(client_page_size).ok_or_else(invalid)?;
        let source = NonZeroU32::new(source_page_size).ok_or_else(invalid)?;
        if source.get().checked_rem(client.get()) != Some(0) {
            return Err(invalid());
        }
        let ratio = source
            .get()
            .checked_div(client.get())
            .and_then(NonZeroU32::new)
            .ok_or_else(invalid)?;

        Ok(Self {
            client_page_size: client,
            source_page_size: source,
            ratio,
        })
    }

    /// Returns the number of records on a client page.
    #[must_use]
    pub const fn client_page_size(&self) -> NonZeroU32 {
        self.client_page_size
    }

    /// Returns the number of records on a source page.
    #[must_use]
    pub const fn source_page_size(&self) -> NonZeroU32 {
        self.source_page_size
    }

    /// Returns the number of client pages packed into one source page.
    #[must_use]
    pub const fn ratio(&self) -> NonZeroU32 {
        self.ratio
    }

    /// Returns the source page holding `client_page`.
    #[must_use]
    pub const fn source_page_for(&self, client_page: u32) -> u32 {
        source_page_for(client_page, self.ratio())
    }

    /// Returns the window of `client_page` within its source block.
    #[must_use]
    pub const fn window_for(&self, client_page: u32) -> PageWindow {
        window_offset_for(client_page, self.ratio(), self.client_page_size)
    }

    /// Returns the last client page supported by `total_count` records.
    #[must_use]
    pub fn max_client_page(&self, total_count: u64) -> u32 {
        max_client_page(total_count, self.client_page_size)
    }

    /// Returns the last source page supported by `total_count` records.
    #[must_use]
    pub fn max_source_page(&self, total_count: u64) -> u32 {
        max_source_page(total_count, self.source_page_size)
    }

    /// Returns true if `client_page` can be shown for `total_count` records.
    ///
    /// Both the client page and the source page holding it must be in range.
    /// A stale total can satisfy one bound but not the other while a new
    /// query is loading, so both are checked.
    #[must_use]
    pub fn is_valid_page(&self, client_page: u32, total_count: u64) -> bool {
        client_page >= 1
            && client_page <= self.max_client_page(total_count)
            && self.source_page_for(client_page) <= self.max_source_page(total_count)
    }
}

impl Default for PageSizeConfig {
    fn default() -> Self {
        let client = non_zero_or_min(DEFAULT_CLIENT_PAGE_SIZE);
        let source = non_zero_or_min(DEFAULT_SOURCE_PAGE_SIZE);
        Self {
            client_page_size: client,
            source_page_size: source,
            ratio: non_zero_or_min(DEFAULT_RATIO),
        }
    }
}

/// Current page state for paginated results.
///
/// Tracks the current position within a paginated result set and provides
/// navigation predicates for a pagination control.
///
/// # Example
///
/// ```
/// use forkful::reviews::pagination::PageInfo;
///
/// let info = PageInfo::new(2, 6)
///     .with_total_pages(Some(5))
///     .with_has_next(true)
///     .with_has_prev(true);
/// assert!(!info.is_first_page());
/// assert!(!info.is_last_page());
/// assert!(info.has_next());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// Current page number (1-based).
    current_page: u32,
    /// Items per page.
    per_page: u32,
    /// Total number of pages if known.
    total_pages: Option<u32>,
    /// Whether more pages exist after the current one.
    has_next: bool,
    /// Whether pages exist before the current one.
    has_prev: bool,
}

impl PageInfo {
    /// Creates a new page info instance.
    ///
    /// The `total_pages` and navigation flags default to unknown / false.
    #[must_use]
    pub const fn new(current_page: u32, per_page: u32) -> Self {
        Self {
            current_page,
            per_page,
            total_pages: None,
            has_next: false,
            has_prev: false,
        }
    }

    /// Sets the total number of pages.
    #[must_use]
    pub const fn with_total_pages(mut self, total_pages: Option<u32>) -> Self {
        self.total_pages = total_pages;
        self
    }

    /// Sets whether there is a next page.
    #[must_use]
    pub const fn with_has_next(mut self, has_next: bool) -> Self {
        self.has_next = has_next;
        self
    }

    /// Sets whether there is a previous page.
    #[must_use]
    pub const fn with_has_prev(mut self, has_prev: bool) -> Self {
        self.has_prev = has_prev;
        self
    }

    /// Returns the current page number (1-based).
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Returns the number of items per page.
    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Returns the total number of pages if known.
    #[must_use]
    pub const fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    /// Returns true if more pages exist after the current one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.has_next
    }

    /// Returns true if pages exist before the current one.
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.has_prev
    }

    /// Returns true if this is the first page.
    #[must_use]
    pub const fn is_first_page(&self) -> bool {
        self.current_page == 1
    }

    /// Returns true if this is the last page.
    #[must_use]
    pub const fn is_last_page(&self) -> bool {
        !self.has_next
    }
}

#[cfg(test)]
#[path = "pagination_tests.rs"]
mod tests;
