//! Error types exposed by the review source layer.

use thiserror::Error;

/// Errors surfaced while configuring or querying the review service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReviewSourceError {
    /// No restaurant identifier was configured.
    #[error("restaurant identifier is required")]
    MissingRestaurantId,

    /// The restaurant identifier cannot be used as a path segment.
    #[error("restaurant identifier is invalid: {value:?}")]
    InvalidRestaurantId {
        /// The rejected identifier.
        value: String,
    },

    /// The review service base URL could not be parsed.
    #[error("review service URL is invalid: {0}")]
    InvalidUrl(String),

    /// The category label is not one the review service understands.
    #[error("unknown review label: {value}")]
    InvalidLabel {
        /// The rejected label text.
        value: String,
    },

    /// The page sizes cannot be aligned with each other.
    #[error(
        "invalid page sizes: source page size {source_page_size} must be a positive \
         multiple of client page size {client_page_size}"
    )]
    InvalidPageSizes {
        /// Records per client page.
        client_page_size: u32,
        /// Records per source page.
        source_page_size: u32,
    },

    /// The review service answered with a non-success status.
    #[error("review service error (status {status}): {message}")]
    Api {
        /// HTTP status code returned by the service.
        status: u16,
        /// Response body excerpt describing the failure.
        message: String,
    },

    /// Networking failed while calling the review service.
    #[error("network error talking to the review service: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("review service response could not be decoded: {message}")]
    Decode {
        /// Decoder error detail.
        message: String,
    },

    /// Configuration could not be loaded.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}

impl ReviewSourceError {
    /// Returns true when retrying the same request may succeed.
    ///
    /// Network failures and server-side (5xx) statuses are transient; every
    /// other variant describes a request that will fail the same way again.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
