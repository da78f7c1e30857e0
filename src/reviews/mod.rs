//! Restaurant review data source and page arithmetic.
//!
//! This module owns everything the browsing controller consumes: the review
//! record types, the [`ReviewSource`] seam with its HTTP implementation, and
//! the pure client/source page mapping in [`pagination`].

pub mod error;
pub mod gateway;
pub mod locator;
pub mod models;
pub mod pagination;

pub use error::ReviewSourceError;
pub use gateway::{
    DEFAULT_REQUEST_TIMEOUT_SECONDS, HttpReviewSource, RestaurantDetailsSource, ReviewPageRequest,
    ReviewSource,
};
pub use locator::{RestaurantId, ReviewServiceLocator};
pub use models::{
    CategoryLabel, LabelRating, LabelRatings, RatingTier, RestaurantSummary, Review, ReviewBlock,
};
pub use pagination::{PageInfo, PageSizeConfig, PageWindow};

#[cfg(test)]
pub use gateway::MockReviewSource;
