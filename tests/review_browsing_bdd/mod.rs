//! Support code for review browsing behavioural tests.

pub(crate) mod state;

pub(crate) use state::BrowsingState;
