//! In-memory [`ReviewSource`] for exercising the browser without HTTP.
//!
//! # Examples
//!
//! ```
//! use forkful::reviews::gateway::test_support::InMemoryReviewSource;
//! use forkful::reviews::{CategoryLabel, ReviewPageRequest};
//!
//! let source = InMemoryReviewSource::new(24);
//! source.set_total(CategoryLabel::Food, false, 30);
//!
//! let block = source.block_for(&ReviewPageRequest {
//!     label: CategoryLabel::Food,
//!     source_page: 2,
//!     text_only: false,
//! });
//! assert_eq!(block.records.len(), 6);
//! assert_eq!(block.total_count, 30);
//! ```

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use super::{ReviewPageRequest, ReviewSource};
use crate::reviews::error::ReviewSourceError;
use crate::reviews::locator::RestaurantId;
use crate::reviews::models::test_support::review_block;
use crate::reviews::models::{CategoryLabel, ReviewBlock};

/// Review source serving numbered fixture reviews from configured totals.
///
/// Review identifiers run from 1 to the total for each `(label, text_only)`
/// pair, so source page `n` holds identifiers
/// `(n - 1) * source_page_size + 1` onwards. Unconfigured pairs have no
/// reviews.
#[derive(Debug)]
pub struct InMemoryReviewSource {
    source_page_size: u32,
    totals: Mutex<HashMap<(CategoryLabel, bool), u64>>,
    requests: Mutex<Vec<ReviewPageRequest>>,
    failure: Mutex<Option<ReviewSourceError>>,
}

impl InMemoryReviewSource {
    /// Creates an empty source serving pages of `source_page_size` reviews.
    #[must_use]
    pub fn new(source_page_size: u32) -> Self {
        Self {
            source_page_size,
            totals: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
        }
    }

    /// Sets the number of reviews matching a label and filter.
    pub fn set_total(&self, label: CategoryLabel, text_only: bool, total: u64) {
        self.totals
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((label, text_only), total);
    }

    /// Makes every following fetch fail with `error`, or succeed again when
    /// `None`.
    pub fn set_failure(&self, error: Option<ReviewSourceError>) {
        *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = error;
    }

    /// Returns the block the source serves for `request` without recording
    /// it.
    #[must_use]
    pub fn block_for(&self, request: &ReviewPageRequest) -> ReviewBlock {
        let total = self
            .totals
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(request.label, request.text_only))
            .copied()
            .unwrap_or(0);
        let size = u64::from(self.source_page_size);
        let first = u64::from(request.source_page.saturating_sub(1))
            .saturating_mul(size)
            .saturating_add(1);
        let last = first.saturating_add(size).saturating_sub(1).min(total);
        review_block(request.label, first..=last, total)
    }

    /// Returns every request served so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<ReviewPageRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ReviewSource for InMemoryReviewSource {
    async fn fetch_reviews(
        &self,
        _restaurant: &RestaurantId,
        request: &ReviewPageRequest,
    ) -> Result<ReviewBlock, ReviewSourceError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(*request);
        if let Some(error) = self
            .failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
        {
            return Err(error);
        }
        Ok(self.block_for(request))
    }
}
