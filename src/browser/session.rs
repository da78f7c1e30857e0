//! Async driver pairing a browsing controller with a review source.

use std::sync::Arc;

use crate::reviews::error::ReviewSourceError;
use crate::reviews::gateway::ReviewSource;
use crate::reviews::locator::RestaurantId;
use crate::reviews::models::{CategoryLabel, Review, ReviewBlock};
use crate::telemetry::{NoopTelemetrySink, TelemetryEvent, TelemetrySink};

use super::controller::{FetchOutcome, ReviewBrowsingController};
use super::query::FetchTicket;

/// Browses the reviews of one restaurant through a [`ReviewSource`].
///
/// Every action settles the controller: the requested fetch is performed, its
/// completion is handed back, and a corrective fetch after a reconciliation
/// is followed until none is pending.
pub struct ReviewBrowser<'source, Source>
where
    Source: ReviewSource + ?Sized,
{
    source: &'source Source,
    restaurant: RestaurantId,
    controller: ReviewBrowsingController,
    telemetry: Arc<dyn TelemetrySink>,
}

impl<'source, Source> ReviewBrowser<'source, Source>
where
    Source: ReviewSource + ?Sized,
{
    /// Creates a browser for `restaurant` with telemetry disabled.
    #[must_use]
    pub fn new(
        source: &'source Source,
        restaurant: RestaurantId,
        controller: ReviewBrowsingController,
    ) -> Self {
        Self {
            source,
            restaurant,
            controller,
            telemetry: Arc::new(NoopTelemetrySink),
        }
    }

    /// Replaces the telemetry sink.
    #[must_use]
    pub fn with_telemetry(mut self, telemetry: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Loads the current page.
    ///
    /// # Errors
    ///
    /// Returns the source error when the fetch for the current state fails.
    /// The controller keeps its previous block and records the error.
    pub async fn load(&mut self) -> Result<(), ReviewSourceError> {
        let ticket = self.controller.load();
        self.settle(ticket).await
    }

    /// Selects a review category and loads its first page.
    ///
    /// # Errors
    ///
    /// Returns the source error when the fetch for the new label fails.
    pub async fn select_label(&mut self, label: CategoryLabel) -> Result<(), ReviewSourceError> {
        let ticket = self.controller.select_label(label);
        self.settle(ticket).await
    }

    /// Toggles the text-only filter and loads the first page.
    ///
    /// # Errors
    ///
    /// Returns the source error when the fetch for the new filter fails.
    pub async fn set_text_only(&mut self, text_only: bool) -> Result<(), ReviewSourceError> {
        let ticket = self.controller.set_text_only(text_only);
        self.settle(ticket).await
    }

    /// Navigates to a client page, clamped to the known page range.
    ///
    /// # Errors
    ///
    /// Returns the source error when the fetch for the page fails.
    pub async fn request_page(&mut self, page: u32) -> Result<(), ReviewSourceError> {
        let ticket = self.controller.request_page(page);
        self.settle(ticket).await
    }

    /// Re-issues the fetch for the current state.
    ///
    /// # Errors
    ///
    /// Returns the source error when the repeated fetch fails again.
    pub async fn retry(&mut self) -> Result<(), ReviewSourceError> {
        let ticket = self.controller.retry();
        self.settle(ticket).await
    }

    /// Fetches the current page again, picking up changes at the service.
    ///
    /// # Errors
    ///
    /// Returns the source error when the fetch fails.
    pub async fn refresh(&mut self) -> Result<(), ReviewSourceError> {
        let ticket = self.controller.refresh();
        self.settle(Some(ticket)).await
    }

    /// Hands a completed fetch to the controller, logging and recording
    /// telemetry for the outcome.
    ///
    /// Use this when fetches are performed outside the browser and may
    /// complete in any order.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<ReviewBlock, ReviewSourceError>,
    ) -> FetchOutcome {
        let outcome = self.controller.complete_fetch(ticket, result);
        self.observe(ticket, &outcome);
        outcome
    }

    /// Returns the reviews to show for the current page.
    #[must_use]
    pub fn display_window(&self) -> &[Review] {
        self.controller.display_window()
    }

    /// Returns the underlying controller.
    #[must_use]
    pub const fn controller(&self) -> &ReviewBrowsingController {
        &self.controller
    }

    /// Returns the underlying controller for issuing tickets whose fetches
    /// are performed outside the browser.
    pub const fn controller_mut(&mut self) -> &mut ReviewBrowsingController {
        &mut self.controller
    }

    /// Returns the restaurant being browsed.
    #[must_use]
    pub const fn restaurant(&self) -> &RestaurantId {
        &self.restaurant
    }

    async fn settle(&mut self, first: Option<FetchTicket>) -> Result<(), ReviewSourceError> {
        let mut pending = first;
        while let Some(ticket) = pending {
            let result = self
                .source
                .fetch_reviews(&self.restaurant, &ticket.request())
                .await;
            pending = match self.complete(ticket, result) {
                FetchOutcome::Applied | FetchOutcome::Discarded => None,
                FetchOutcome::Reconciled { refetch, .. } => refetch,
                FetchOutcome::Failed(error) => return Err(error),
            };
        }
        Ok(())
    }

    fn observe(&self, ticket: FetchTicket, outcome: &FetchOutcome) {
        match outcome {
            FetchOutcome::Applied => {
                tracing::debug!(
                    label = ticket.query.label.as_str(),
                    source_page = ticket.source_page,
                    total = self.controller.total_count(),
                    "review page applied"
                );
            }
            FetchOutcome::Discarded => {
                tracing::debug!(
                    label = ticket.query.label.as_str(),
                    source_page = ticket.source_page,
                    "discarding stale review response"
                );
                self.telemetry.record(TelemetryEvent::StaleResponseDiscarded {
                    label: ticket.query.label.as_str().to_owned(),
                    text_only: ticket.query.text_only,
                    source_page: ticket.source_page,
                });
            }
            FetchOutcome::Reconciled { from_page, .. } => {
                let max_client_page = self.controller.max_client_page();
                tracing::debug!(
                    from_page,
                    max_client_page,
                    "page out of range after fetch, returning to page 1"
                );
                self.telemetry.record(TelemetryEvent::PageReconciled {
                    from_page: *from_page,
                    max_client_page,
                });
            }
            FetchOutcome::Failed(error) => {
                tracing::warn!(
                    source_page = ticket.source_page,
                    "review fetch failed: {error}"
                );
                self.telemetry.record(TelemetryEvent::ReviewFetchFailed {
                    source_page: ticket.source_page,
                    message: error.to_string(),
                });
            }
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
