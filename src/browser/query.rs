//! Query state and fetch tags for review browsing.

use crate::reviews::gateway::ReviewPageRequest;
use crate::reviews::models::CategoryLabel;

/// Filter combination the user is browsing.
///
/// Changing either field invalidates every page derived under the previous
/// query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ReviewQuery {
    /// Selected review category.
    pub label: CategoryLabel,
    /// Only show reviews with written feedback.
    pub text_only: bool,
}

impl ReviewQuery {
    /// Creates a query for the given label and filter.
    #[must_use]
    pub const fn new(label: CategoryLabel, text_only: bool) -> Self {
        Self { label, text_only }
    }
}

/// Tag attached to a fetch: the query and source page it was issued for.
///
/// A completed fetch is only applied when its ticket still equals the ticket
/// derived from the controller's current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    /// Query the fetch was issued under.
    pub query: ReviewQuery,
    /// Source page requested (1-based).
    pub source_page: u32,
}

impl FetchTicket {
    /// Returns the source request described by this ticket.
    #[must_use]
    pub const fn request(&self) -> ReviewPageRequest {
        ReviewPageRequest {
            label: self.query.label,
            source_page: self.source_page,
            text_only: self.query.text_only,
        }
    }
}
