//! Gateways for loading review pages from the review service.
//!
//! The browsing controller only ever sees the [`ReviewSource`] trait, so tests
//! can substitute a mock while [`HttpReviewSource`] handles real HTTP
//! requests.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use super::error::ReviewSourceError;
use super::locator::{RestaurantId, ReviewServiceLocator};
use super::models::{
    ApiEnvelope, ApiRestaurantDetails, ApiReviewPage, CategoryLabel, RestaurantSummary,
    ReviewBlock,
};

/// Default HTTP timeout for review requests, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 10;

const ERROR_BODY_EXCERPT_CHARS: usize = 160;

/// Parameters identifying one source page of reviews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReviewPageRequest {
    /// Category to list reviews for.
    pub label: CategoryLabel,
    /// Source page to load (1-based).
    pub source_page: u32,
    /// Restrict results to reviews with written feedback.
    pub text_only: bool,
}

/// Paged review query service.
///
/// Implementations must be idempotent: repeating a request with identical
/// arguments has no side effects, because the controller re-issues requests
/// after discarded or failed responses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewSource: Send + Sync {
    /// Fetch one source page of reviews together with the total match count.
    async fn fetch_reviews(
        &self,
        restaurant: &RestaurantId,
        request: &ReviewPageRequest,
    ) -> Result<ReviewBlock, ReviewSourceError>;
}

/// Restaurant details lookup.
///
/// The per-label ratings and counts it returns let a reader choose which
/// label to browse before paging through reviews.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RestaurantDetailsSource: Send + Sync {
    /// Fetch the headline data and per-label ratings of a restaurant.
    async fn fetch_details(
        &self,
        restaurant: &RestaurantId,
    ) -> Result<RestaurantSummary, ReviewSourceError>;
}

/// Reqwest-backed review source.
#[derive(Debug, Clone)]
pub struct HttpReviewSource {
    client: Client,
    locator: ReviewServiceLocator,
}

impl HttpReviewSource {
    /// Creates a source for the given service locator and request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewSourceError::Configuration`] when the HTTP client
    /// cannot be constructed.
    pub fn new(locator: ReviewServiceLocator, timeout: Duration) -> Result<Self, ReviewSourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| ReviewSourceError::Configuration {
                message: format!("failed to configure review HTTP client: {error}"),
            })?;
        Ok(Self { client, locator })
    }
}

/// Builds the query string pairs for a review page request.
///
/// `textonly` is only sent when the filter is active; the service treats its
/// presence as the flag.
pub(crate) fn query_pairs(request: &ReviewPageRequest) -> Vec<(&'static str, String)> {
    let mut pairs = vec![
        ("label", request.label.as_str().to_owned()),
        ("page", request.source_page.to_string()),
        ("count", "true".to_owned()),
    ];
    if request.text_only {
        pairs.push(("textonly", "true".to_owned()));
    }
    pairs
}

impl HttpReviewSource {
    /// Sends a GET request and decodes the `data` member of the response.
    async fn get_data<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&'static str, String)],
    ) -> Result<T, ReviewSourceError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|error| ReviewSourceError::Network {
                message: format!("review request transport failed: {error}"),
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.map_or_else(
                |_| "(failed to read error response body)".to_owned(),
                |content| truncate_for_message(content.as_str(), ERROR_BODY_EXCERPT_CHARS),
            );
            return Err(ReviewSourceError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let envelope: ApiEnvelope<T> =
            response
                .json()
                .await
                .map_err(|error| ReviewSourceError::Decode {
                    message: error.to_string(),
                })?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl ReviewSource for HttpReviewSource {
    async fn fetch_reviews(
        &self,
        restaurant: &RestaurantId,
        request: &ReviewPageRequest,
    ) -> Result<ReviewBlock, ReviewSourceError> {
        let url = self.locator.reviews_url(restaurant)?;
        tracing::debug!(
            restaurant = restaurant.as_str(),
            label = request.label.as_str(),
            page = request.source_page,
            text_only = request.text_only,
            "fetching review page"
        );

        let page: ApiReviewPage = self.get_data(url, &query_pairs(request)).await?;
        Ok(page.into())
    }
}

#[async_trait]
impl RestaurantDetailsSource for HttpReviewSource {
    async fn fetch_details(
        &self,
        restaurant: &RestaurantId,
    ) -> Result<RestaurantSummary, ReviewSourceError> {
        let url = self.locator.details_url(restaurant)?;
        tracing::debug!(restaurant = restaurant.as_str(), "fetching restaurant details");

        let details: ApiRestaurantDetails = self.get_data(url, &[]).await?;
        Ok(details.into())
    }
}

fn truncate_for_message(message: &str, max_chars: usize) -> String {
    let mut output = String::new();
    let mut chars = message.chars();

    for _ in 0..max_chars {
        let Some(character) = chars.next() else {
            return output;
        };
        output.push(character);
    }

    if chars.next().is_some() {
        output.push_str("...");
    }

    output
}

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
