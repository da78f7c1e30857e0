//! Review browsing state machine.
//!
//! [`ReviewBrowsingController`] owns the selected label, the text-only filter
//! and the client page. Actions return the [`FetchTicket`] that has to be
//! loaded (if any); completed fetches are handed back through
//! [`ReviewBrowsingController::complete_fetch`]. The controller performs no
//! I/O, so out-of-order completion can be driven directly in tests.
//!
//! Derived values (source page, validity, the display slice) are recomputed
//! from the stored state on every call and never cached.

use crate::reviews::error::ReviewSourceError;
use crate::reviews::models::{CategoryLabel, Review, ReviewBlock};
use crate::reviews::pagination::{PageInfo, PageSizeConfig};

use super::query::{FetchTicket, ReviewQuery};

/// Result of handing a completed fetch to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The block was stored and the current page is usable.
    Applied,
    /// The block was stored but the current page exceeded the new total, so
    /// the controller moved back to page 1.
    Reconciled {
        /// Client page that was out of range.
        from_page: u32,
        /// Corrective fetch for page 1, unless the stored block covers it.
        refetch: Option<FetchTicket>,
    },
    /// The fetch matched the current state but failed; the previous block is
    /// retained.
    Failed(ReviewSourceError),
    /// The fetch was issued for a query or page that is no longer current.
    Discarded,
}

#[derive(Debug, Clone)]
struct LoadedBlock {
    ticket: FetchTicket,
    block: ReviewBlock,
}

/// Owns review query state and computes the validated display window.
#[derive(Debug, Clone)]
pub struct ReviewBrowsingController {
    sizes: PageSizeConfig,
    query: ReviewQuery,
    client_page: u32,
    loaded: Option<LoadedBlock>,
    in_flight: Option<FetchTicket>,
    last_error: Option<ReviewSourceError>,
}

impl ReviewBrowsingController {
    /// Creates a controller on page 1 of the default query.
    #[must_use]
    pub fn new(sizes: PageSizeConfig) -> Self {
        Self::with_query(sizes, ReviewQuery::default())
    }

    /// Creates a controller on page 1 of the given query.
    #[must_use]
    pub const fn with_query(sizes: PageSizeConfig, query: ReviewQuery) -> Self {
        Self {
            sizes,
            query,
            client_page: 1,
            loaded: None,
            in_flight: None,
            last_error: None,
        }
    }

    /// Returns the ticket for the initial fetch of the current state.
    pub fn load(&mut self) -> Option<FetchTicket> {
        self.issue()
    }

    /// Re-issues the fetch for the current state, typically after a failure.
    ///
    /// A recorded error always leads to a new fetch, even when a block for
    /// the current ticket is stored from before the failure.
    pub fn retry(&mut self) -> Option<FetchTicket> {
        if self.last_error.is_some() {
            return Some(self.refresh());
        }
        self.issue()
    }

    /// Forces a fetch of the current state even when its block is loaded.
    ///
    /// Used to pick up changes at the review service; the completion runs
    /// through the same reconciliation as any other fetch.
    pub fn refresh(&mut self) -> FetchTicket {
        let ticket = self.current_ticket();
        self.last_error = None;
        self.in_flight = Some(ticket);
        ticket
    }

    /// Selects a review category and returns to page 1.
    pub fn select_label(&mut self, label: CategoryLabel) -> Option<FetchTicket> {
        self.change_query(ReviewQuery {
            label,
            ..self.query
        })
    }

    /// Toggles the text-only filter and returns to page 1.
    pub fn set_text_only(&mut self, text_only: bool) -> Option<FetchTicket> {
        self.change_query(ReviewQuery {
            text_only,
            ..self.query
        })
    }

    /// Navigates to client page `page`.
    ///
    /// The page is clamped to `1..=max(1, max_client_page())`, where the
    /// maximum comes from the last total fetched under the current query.
    pub fn request_page(&mut self, page: u32) -> Option<FetchTicket> {
        let last_page = self.max_client_page().max(1);
        self.client_page = page.clamp(1, last_page);
        self.issue()
    }

    /// Hands a completed fetch back to the controller.
    ///
    /// The result is applied only if `ticket` equals the ticket of the
    /// current state; anything else, success or failure, is discarded.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<ReviewBlock, ReviewSourceError>,
    ) -> FetchOutcome {
        if ticket != self.current_ticket() {
            return FetchOutcome::Discarded;
        }
        if self.in_flight == Some(ticket) {
            self.in_flight = None;
        }

        match result {
            Err(error) => {
                self.last_error = Some(error.clone());
                FetchOutcome::Failed(error)
            }
            Ok(block) => {
                self.last_error = None;
                self.loaded = Some(LoadedBlock { ticket, block });
                self.reconcile()
            }
        }
    }

    /// Returns the reviews to show for the current page.
    ///
    /// Empty while the block for the current query and page has not arrived,
    /// or when the current page is out of range for the fetched total.
    #[must_use]
    pub fn display_window(&self) -> &[Review] {
        let current = self.current_ticket();
        let Some(loaded) = self.loaded.as_ref().filter(|loaded| loaded.ticket == current) else {
            return &[];
        };
        if !self
            .sizes
            .is_valid_page(self.client_page, loaded.block.total_count)
        {
            return &[];
        }

        let range = self
            .sizes
            .window_for(self.client_page)
            .clipped_range(loaded.block.records.len());
        loaded.block.records.get(range).unwrap_or_default()
    }

    /// Returns the ticket derived from the current query and page.
    #[must_use]
    pub const fn current_ticket(&self) -> FetchTicket {
        FetchTicket {
            query: self.query,
            source_page: self.sizes.source_page_for(self.client_page),
        }
    }

    /// Returns the client page being viewed (1-based).
    #[must_use]
    pub const fn current_client_page(&self) -> u32 {
        self.client_page
    }

    /// Returns the last client page under the current query, or 0 when no
    /// total is known yet or the query has no results.
    #[must_use]
    pub fn max_client_page(&self) -> u32 {
        self.total_count()
            .map_or(0, |total| self.sizes.max_client_page(total))
    }

    /// Returns the total match count last fetched under the current query.
    #[must_use]
    pub fn total_count(&self) -> Option<u64> {
        self.loaded
            .as_ref()
            .filter(|loaded| loaded.ticket.query == self.query)
            .map(|loaded| loaded.block.total_count)
    }

    /// Returns true while the fetch for the current state is outstanding.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight == Some(self.current_ticket())
    }

    /// Returns the error of the last failed fetch for the current state.
    #[must_use]
    pub const fn last_error(&self) -> Option<&ReviewSourceError> {
        self.last_error.as_ref()
    }

    /// Returns the active query.
    #[must_use]
    pub const fn query(&self) -> ReviewQuery {
        self.query
    }

    /// Returns the page sizes this controller was built with.
    #[must_use]
    pub const fn page_sizes(&self) -> PageSizeConfig {
        self.sizes
    }

    /// Returns view state for a pagination control.
    #[must_use]
    pub fn page_info(&self) -> PageInfo {
        let total_pages = self
            .total_count()
            .map(|total| self.sizes.max_client_page(total));
        let last_page = total_pages.unwrap_or(0);

        PageInfo::new(self.client_page, self.sizes.client_page_size().get())
            .with_total_pages(total_pages)
            .with_has_next(self.client_page < last_page)
            .with_has_prev(self.client_page > 1)
    }

    /// Switches to `query` on page 1. A stored block fetched under any other
    /// query is dropped, so returning to that query fetches it again.
    fn change_query(&mut self, query: ReviewQuery) -> Option<FetchTicket> {
        if self.query != query {
            self.loaded = None;
        }
        self.query = query;
        self.client_page = 1;
        self.issue()
    }

    /// Records the ticket of the current state as in flight, unless the
    /// stored block already covers it.
    fn issue(&mut self) -> Option<FetchTicket> {
        let ticket = self.current_ticket();
        self.last_error = None;

        let covered = self
            .loaded
            .as_ref()
            .is_some_and(|loaded| loaded.ticket == ticket);
        if covered {
            self.in_flight = None;
            return None;
        }

        self.in_flight = Some(ticket);
        Some(ticket)
    }

    /// Moves back to page 1 when the fetched total no longer reaches the
    /// current page. A query without results keeps its page.
    fn reconcile(&mut self) -> FetchOutcome {
        let last_page = self.max_client_page();
        if last_page == 0 || self.client_page <= last_page {
            return FetchOutcome::Applied;
        }

        let from_page = self.client_page;
        self.client_page = 1;
        FetchOutcome::Reconciled {
            from_page,
            refetch: self.issue(),
        }
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
