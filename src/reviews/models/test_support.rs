//! Test helpers for constructing `Review` and `ReviewBlock` fixtures.
//!
//! # Examples
//!
//! ```
//! use forkful::reviews::models::CategoryLabel;
//! use forkful::reviews::models::test_support::{review_block, review_with_id};
//!
//! let review = review_with_id(7, CategoryLabel::Service);
//! assert_eq!(review.rating_id, 7);
//!
//! let block = review_block(CategoryLabel::Food, 1..=24, 30);
//! assert_eq!(block.records.len(), 24);
//! assert_eq!(block.total_count, 30);
//! ```

use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};

use super::{CategoryLabel, Review, ReviewBlock};

/// Fixed timestamp used by every fixture review.
const FIXTURE_TIMESTAMP: i64 = 1_709_294_400;

/// Creates a review whose feedback names its identifier.
#[must_use]
pub fn review_with_id(rating_id: u64, label: CategoryLabel) -> Review {
    Review {
        feedback: format!("{label} review {rating_id}"),
        label,
        rating: 4.0,
        rating_id,
        rating_label: None,
        review_time: DateTime::<Utc>::from_timestamp(FIXTURE_TIMESTAMP, 0).unwrap_or_default(),
        username: Some(format!("diner-{rating_id}")),
    }
}

/// Creates a block holding reviews for the given identifiers.
#[must_use]
pub fn review_block(label: CategoryLabel, ids: RangeInclusive<u64>, total_count: u64) -> ReviewBlock {
    ReviewBlock {
        records: ids.map(|id| review_with_id(id, label)).collect(),
        total_count,
    }
}

/// Returns the identifiers of the given reviews, in order.
#[must_use]
pub fn rating_ids(reviews: &[Review]) -> Vec<u64> {
    reviews.iter().map(|review| review.rating_id).collect()
}
