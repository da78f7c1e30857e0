//! Identity wrappers and URL construction for the review service.

use url::Url;

use super::error::ReviewSourceError;

/// Restaurant identifier wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RestaurantId(String);

impl RestaurantId {
    /// Validates that the identifier is non-empty and path-safe.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewSourceError::MissingRestaurantId`] for a blank value and
    /// [`ReviewSourceError::InvalidRestaurantId`] when the value contains a
    /// path separator, query or fragment delimiter.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ReviewSourceError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ReviewSourceError::MissingRestaurantId);
        }
        if trimmed.contains(['/', '?', '#', '\\']) || trimmed == "." || trimmed == ".." {
            return Err(ReviewSourceError::InvalidRestaurantId {
                value: trimmed.to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the identifier.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for RestaurantId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Parsed base URL of the review service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewServiceLocator {
    api_base: Url,
}

impl ReviewServiceLocator {
    /// Parses the base URL of the review service (e.g.
    /// `https://reviews.example.com/api`).
    ///
    /// # Errors
    ///
    /// Returns [`ReviewSourceError::InvalidUrl`] when the value is not an
    /// absolute `http` or `https` URL.
    pub fn parse(api_base: &str) -> Result<Self, ReviewSourceError> {
        let parsed = Url::parse(api_base.trim())
            .map_err(|error| ReviewSourceError::InvalidUrl(error.to_string()))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ReviewSourceError::InvalidUrl(format!(
                "unsupported scheme: {}",
                parsed.scheme()
            )));
        }
        if parsed.cannot_be_a_base() {
            return Err(ReviewSourceError::InvalidUrl(
                "URL cannot be used as a base".to_owned(),
            ));
        }

        Ok(Self { api_base: parsed })
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Builds the review listing URL for a restaurant.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewSourceError::InvalidUrl`] if the URL cannot be extended
    /// with path segments.
    pub fn reviews_url(&self, restaurant: &RestaurantId) -> Result<Url, ReviewSourceError> {
        self.restaurant_url(restaurant, &["reviews"])
    }

    /// Builds the details URL for a restaurant.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewSourceError::InvalidUrl`] if the URL cannot be extended
    /// with path segments.
    pub fn details_url(&self, restaurant: &RestaurantId) -> Result<Url, ReviewSourceError> {
        self.restaurant_url(restaurant, &[])
    }

    fn restaurant_url(
        &self,
        restaurant: &RestaurantId,
        trailing: &[&str],
    ) -> Result<Url, ReviewSourceError> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|()| ReviewSourceError::InvalidUrl("URL cannot be used as a base".to_owned()))?
            .pop_if_empty()
            .extend(["restaurants", restaurant.as_str()])
            .extend(trailing);
        Ok(url)
    }
}
