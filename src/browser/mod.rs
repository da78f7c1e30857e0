//! Review browsing: query state, page reconciliation and stale-response
//! handling.
//!
//! [`ReviewBrowsingController`] is the synchronous state machine;
//! [`ReviewBrowser`] drives it against a
//! [`ReviewSource`](crate::reviews::ReviewSource).

pub mod controller;
pub mod query;
pub mod session;

pub use controller::{FetchOutcome, ReviewBrowsingController};
pub use query::{FetchTicket, ReviewQuery};
pub use session::ReviewBrowser;
