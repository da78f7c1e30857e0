//! Scenario state for review browsing BDD tests.

use forkful::reviews::gateway::test_support::InMemoryReviewSource;
use forkful::{FetchOutcome, FetchTicket, ReviewBrowsingController};
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;

/// State shared across steps in a review browsing scenario.
#[derive(ScenarioState, Default)]
pub(crate) struct BrowsingState {
    /// Controller under test.
    pub(crate) controller: Slot<ReviewBrowsingController>,
    /// Review service answering fetches.
    pub(crate) source: Slot<InMemoryReviewSource>,
    /// Tickets issued but not yet answered.
    pub(crate) pending: Slot<Vec<FetchTicket>>,
    /// Tickets answered so far, in order.
    pub(crate) answered: Slot<Vec<FetchTicket>>,
    /// Ticket returned by the most recent settled action, if any.
    pub(crate) last_issued: Slot<Option<FetchTicket>>,
    /// Outcome of the most recent completion.
    pub(crate) last_outcome: Slot<FetchOutcome>,
}

/// Answers `first` from the source and follows corrective fetches until the
/// controller settles. Returns every ticket answered.
pub(crate) fn settle(
    controller: &mut ReviewBrowsingController,
    source: &InMemoryReviewSource,
    first: Option<FetchTicket>,
) -> (Vec<FetchTicket>, Option<FetchOutcome>) {
    let mut answered = Vec::new();
    let mut last_outcome = None;
    let mut pending = first;
    while let Some(ticket) = pending {
        let block = source.block_for(&ticket.request());
        let outcome = controller.complete_fetch(ticket, Ok(block));
        answered.push(ticket);
        pending = match &outcome {
            FetchOutcome::Reconciled { refetch, .. } => *refetch,
            FetchOutcome::Applied | FetchOutcome::Failed(_) | FetchOutcome::Discarded => None,
        };
        last_outcome = Some(outcome);
    }
    (answered, last_outcome)
}
