//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.forkful.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `FORKFUL_API_BASE_URL`,
//!    `FORKFUL_RESTAURANT_ID`, `FORKFUL_LABEL`, `FORKFUL_PAGE`
//! 4. **Command-line arguments** – `--api-base-url`/`-a`,
//!    `--restaurant-id`/`-r`, `--label`/`-l`, `--page`/`-p`
//!
//! # Configuration File
//!
//! ```toml
//! api_base_url = "https://reviews.example.com/api"
//! restaurant_id = "17"
//! label = "service"
//! text_only = true
//! page = 3
//! request_timeout_seconds = 5
//! telemetry = false
//! ```

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Deserializer, Serialize};

use crate::reviews::error::ReviewSourceError;
use crate::reviews::gateway::DEFAULT_REQUEST_TIMEOUT_SECONDS;
use crate::reviews::locator::{RestaurantId, ReviewServiceLocator};
use crate::reviews::models::CategoryLabel;

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use forkful::ForkfulConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = ForkfulConfig::load().expect("failed to load configuration");
/// let restaurant = config.restaurant().expect("restaurant required");
/// let locator = config.locator().expect("base URL required");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "FORKFUL",
    discovery(
        dotfile_name = ".forkful.toml",
        config_file_name = "forkful.toml",
        app_name = "forkful"
    )
)]
pub struct ForkfulConfig {
    /// Base URL of the review service, e.g. `https://reviews.example.com/api`.
    ///
    /// Can be provided via:
    /// - CLI: `--api-base-url <URL>` or `-a <URL>`
    /// - Environment: `FORKFUL_API_BASE_URL`
    /// - Config file: `api_base_url = "..."`
    #[ortho_config(cli_short = 'a')]
    pub api_base_url: Option<String>,

    /// Identifier of the restaurant whose reviews are browsed.
    ///
    /// Can be provided via:
    /// - CLI: `--restaurant-id <ID>` or `-r <ID>`
    /// - Environment: `FORKFUL_RESTAURANT_ID`
    /// - Config file: `restaurant_id = "..."`
    ///
    /// Numeric values are accepted because the environment layer parses
    /// `FORKFUL_RESTAURANT_ID=42` as an integer.
    #[ortho_config(cli_short = 'r')]
    #[serde(deserialize_with = "deserialize_identifier")]
    pub restaurant_id: Option<String>,

    /// Review category to browse (`food`, `service`, `delivery`, `price` or
    /// `ambience`). Defaults to `food` when unset.
    ///
    /// Can be provided via:
    /// - CLI: `--label <LABEL>` or `-l <LABEL>`
    /// - Environment: `FORKFUL_LABEL`
    /// - Config file: `label = "..."`
    #[ortho_config(cli_short = 'l')]
    pub label: Option<String>,

    /// Only list reviews that carry written feedback.
    ///
    /// Can be provided via:
    /// - CLI: `--text-only` / `-t`
    /// - Config file: `text_only = true`
    ///
    /// Note: `FORKFUL_TEXT_ONLY` is not read because `ortho_config` does not
    /// load boolean values from the environment.
    #[ortho_config(cli_short = 't')]
    pub text_only: bool,

    /// Client page to show (1-based). Values beyond the last page are
    /// clamped once the total is known.
    ///
    /// Can be provided via:
    /// - CLI: `--page <N>` or `-p <N>`
    /// - Environment: `FORKFUL_PAGE`
    /// - Config file: `page = 3`
    #[ortho_config(cli_short = 'p')]
    pub page: u32,

    /// HTTP timeout for review requests, in seconds. Defaults to 10.
    #[ortho_config()]
    pub request_timeout_seconds: u64,

    /// Writes telemetry events to stderr as JSON lines.
    ///
    /// Can be provided via:
    /// - CLI: `--telemetry`
    /// - Config file: `telemetry = true`
    #[ortho_config()]
    pub telemetry: bool,
}

impl Default for ForkfulConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            restaurant_id: None,
            label: None,
            text_only: false,
            page: 1,
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
            telemetry: false,
        }
    }
}

impl ForkfulConfig {
    /// Returns the validated restaurant identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewSourceError::MissingRestaurantId`] when no identifier
    /// is configured, or [`ReviewSourceError::InvalidRestaurantId`] when it
    /// is not path-safe.
    pub fn restaurant(&self) -> Result<RestaurantId, ReviewSourceError> {
        let raw = self
            .restaurant_id
            .as_deref()
            .ok_or(ReviewSourceError::MissingRestaurantId)?;
        RestaurantId::new(raw)
    }

    /// Returns the parsed review service locator.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewSourceError::Configuration`] when no base URL is
    /// configured and [`ReviewSourceError::InvalidUrl`] when it cannot be
    /// parsed.
    pub fn locator(&self) -> Result<ReviewServiceLocator, ReviewSourceError> {
        let raw = self
            .api_base_url
            .as_deref()
            .ok_or_else(|| ReviewSourceError::Configuration {
                message: "review service URL is required (use --api-base-url or -a)".to_owned(),
            })?;
        ReviewServiceLocator::parse(raw)
    }

    /// Returns the configured label, defaulting to [`CategoryLabel::Food`].
    ///
    /// # Errors
    ///
    /// Returns [`ReviewSourceError::InvalidLabel`] for an unknown label.
    pub fn category_label(&self) -> Result<CategoryLabel, ReviewSourceError> {
        self.label
            .as_deref()
            .map_or_else(|| Ok(CategoryLabel::default()), str::parse)
    }

    /// Returns the HTTP request timeout.
    ///
    /// A zero value falls back to the default so requests can still finish.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        let seconds = if self.request_timeout_seconds == 0 {
            DEFAULT_REQUEST_TIMEOUT_SECONDS
        } else {
            self.request_timeout_seconds
        };
        Duration::from_secs(seconds)
    }
}

/// Identifier as it may arrive from a configuration layer.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawIdentifier {
    Text(String),
    Unsigned(u64),
    Signed(i64),
}

/// Reads an optional identifier given either as a string or as an integer.
fn deserialize_identifier<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawIdentifier>::deserialize(deserializer)?;
    Ok(raw.map(|identifier| match identifier {
        RawIdentifier::Text(text) => text,
        RawIdentifier::Unsigned(number) => number.to_string(),
        RawIdentifier::Signed(number) => number.to_string(),
    }))
}

#[cfg(test)]
mod tests;
