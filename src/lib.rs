//! Forkful library crate for browsing restaurant reviews page by page.
//!
//! The review service serves large source pages while readers page through
//! small client pages. The library maps one onto the other, keeps the
//! browsing state consistent across label and filter changes, and discards
//! responses that arrive for a query the reader has already left.

pub mod browser;
pub mod config;
pub mod reviews;
pub mod telemetry;

pub use browser::{FetchOutcome, FetchTicket, ReviewBrowser, ReviewBrowsingController, ReviewQuery};
pub use config::ForkfulConfig;
pub use reviews::{
    CategoryLabel, HttpReviewSource, LabelRating, LabelRatings, PageInfo, PageSizeConfig,
    RatingTier, RestaurantDetailsSource, RestaurantId, RestaurantSummary, Review, ReviewBlock,
    ReviewServiceLocator, ReviewSource, ReviewSourceError,
};
pub use telemetry::{NoopTelemetrySink, StderrJsonlTelemetrySink, TelemetryEvent, TelemetrySink};
