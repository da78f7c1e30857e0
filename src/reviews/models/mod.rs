//! Data models for restaurant reviews.
//!
//! Types prefixed with `Api` are internal deserialisation targets matching the
//! review service's snake_case payload. They convert into the public domain
//! types used by the browsing controller.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::ReviewSourceError;

/// Review category a restaurant is rated on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryLabel {
    /// Quality of the food.
    #[default]
    Food,
    /// Staff and table service.
    Service,
    /// Delivery speed and packaging.
    Delivery,
    /// Value for money.
    Price,
    /// Atmosphere of the venue.
    Ambience,
}

impl CategoryLabel {
    /// Every label, in display order.
    pub const ALL: [Self; 5] = [
        Self::Food,
        Self::Service,
        Self::Delivery,
        Self::Price,
        Self::Ambience,
    ];

    /// Returns the wire name of the label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Service => "service",
            Self::Delivery => "delivery",
            Self::Price => "price",
            Self::Ambience => "ambience",
        }
    }
}

impl fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryLabel {
    type Err = ReviewSourceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalised = value.trim();
        Self::ALL
            .into_iter()
            .find(|label| label.as_str().eq_ignore_ascii_case(normalised))
            .ok_or_else(|| ReviewSourceError::InvalidLabel {
                value: value.to_owned(),
            })
    }
}

/// A single user review of a restaurant.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    /// Written feedback; empty when the reviewer left only a rating.
    pub feedback: String,
    /// Category the review was filed under.
    pub label: CategoryLabel,
    /// Star rating between 0 and 5.
    pub rating: f64,
    /// Identifier of the rating at the review service.
    pub rating_id: u64,
    /// Source-specific rating caption, if any.
    pub rating_label: Option<String>,
    /// When the review was written.
    pub review_time: DateTime<Utc>,
    /// Display name of the reviewer.
    pub username: Option<String>,
}

impl Review {
    /// Returns true when the reviewer wrote any feedback text.
    #[must_use]
    pub fn has_feedback(&self) -> bool {
        !self.feedback.trim().is_empty()
    }

    /// Returns the rating tier for this review.
    #[must_use]
    pub fn tier(&self) -> RatingTier {
        RatingTier::from_rating(self.rating)
    }
}

/// Coarse classification of a star rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RatingTier {
    /// 4.5 and above.
    Excellent,
    /// 4.0 up to 4.5.
    VeryGood,
    /// 3.5 up to 4.0.
    Good,
    /// 3.0 up to 3.5.
    Average,
    /// Below 3.0.
    Poor,
}

impl RatingTier {
    /// Classifies a rating. Non-finite ratings are treated as poor.
    #[must_use]
    pub fn from_rating(rating: f64) -> Self {
        if rating >= 4.5 {
            Self::Excellent
        } else if rating >= 4.0 {
            Self::VeryGood
        } else if rating >= 3.5 {
            Self::Good
        } else if rating >= 3.0 {
            Self::Average
        } else {
            Self::Poor
        }
    }

    /// Returns a stable machine-readable identifier for the tier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::VeryGood => "very_good",
            Self::Good => "good",
            Self::Average => "average",
            Self::Poor => "poor",
        }
    }
}

/// One source page of reviews plus the size of the whole result set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewBlock {
    /// Reviews on the requested source page, in service order.
    pub records: Vec<Review>,
    /// Number of reviews matching the query across all pages.
    pub total_count: u64,
}

/// Aggregate rating of one review category.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct LabelRating {
    /// Average star rating between 0 and 5; 0 when nobody rated the label.
    pub rating: f64,
    /// Number of reviews filed under the label.
    pub count: u64,
}

/// Ratings of every review category for one restaurant.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct LabelRatings {
    /// Food rating.
    pub food: LabelRating,
    /// Service rating.
    pub service: LabelRating,
    /// Delivery rating.
    pub delivery: LabelRating,
    /// Price rating.
    pub price: LabelRating,
    /// Ambience rating.
    pub ambience: LabelRating,
}

impl LabelRatings {
    /// Returns the rating of `label`.
    #[must_use]
    pub const fn get(&self, label: CategoryLabel) -> LabelRating {
        match label {
            CategoryLabel::Food => self.food,
            CategoryLabel::Service => self.service,
            CategoryLabel::Delivery => self.delivery,
            CategoryLabel::Price => self.price,
            CategoryLabel::Ambience => self.ambience,
        }
    }

    /// Iterates over every label with its rating, in display order.
    pub fn by_label(&self) -> impl Iterator<Item = (CategoryLabel, LabelRating)> + '_ {
        CategoryLabel::ALL
            .into_iter()
            .map(move |label| (label, self.get(label)))
    }
}

/// Headline data for a restaurant, used to pick a label to browse.
#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantSummary {
    /// Display name of the restaurant.
    pub name: String,
    /// Overall average rating, if the service reports one.
    pub rating: Option<f64>,
    /// Number of reviews across all labels.
    pub review_count: u64,
    /// Per-label ratings and review counts.
    pub labels: LabelRatings,
}

/// Envelope wrapping every review service response.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiEnvelope<T> {
    pub(crate) data: T,
}

/// Review page payload as returned by the review service.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiReviewPage {
    pub(crate) reviews: Vec<ApiReview>,
    pub(crate) total_reviews: u64,
}

/// Review record as returned by the review service.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiReview {
    #[serde(default)]
    pub(crate) feedback: Option<String>,
    pub(crate) label: CategoryLabel,
    pub(crate) rating: f64,
    pub(crate) rating_id: u64,
    #[serde(default)]
    pub(crate) rating_label: Option<String>,
    pub(crate) review_time: DateTime<Utc>,
    #[serde(default)]
    pub(crate) username: Option<String>,
}

/// Restaurant details payload as returned by the review service.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiRestaurantDetails {
    pub(crate) restaurant: ApiRestaurant,
    #[serde(default)]
    pub(crate) labels: LabelRatings,
}

/// Restaurant record nested in the details payload.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiRestaurant {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) rating: Option<f64>,
    #[serde(default)]
    pub(crate) review_count: Option<u64>,
}

impl From<ApiRestaurantDetails> for RestaurantSummary {
    fn from(value: ApiRestaurantDetails) -> Self {
        Self {
            name: value.restaurant.name,
            rating: value.restaurant.rating,
            review_count: value.restaurant.review_count.unwrap_or_default(),
            labels: value.labels,
        }
    }
}

impl From<ApiReview> for Review {
    fn from(value: ApiReview) -> Self {
        Self {
            feedback: value.feedback.unwrap_or_default(),
            label: value.label,
            rating: value.rating,
            rating_id: value.rating_id,
            rating_label: value.rating_label,
            review_time: value.review_time,
            username: value.username,
        }
    }
}

impl From<ApiReviewPage> for ReviewBlock {
    fn from(value: ApiReviewPage) -> Self {
        Self {
            records: value.reviews.into_iter().map(Review::from).collect(),
            total_count: value.total_reviews,
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
