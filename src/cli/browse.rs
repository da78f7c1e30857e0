//! Loads one page of restaurant reviews and writes it to stdout.

use std::sync::Arc;

use forkful::telemetry::{NoopTelemetrySink, StderrJsonlTelemetrySink, TelemetrySink};
use forkful::{
    ForkfulConfig, HttpReviewSource, PageSizeConfig, RestaurantDetailsSource, ReviewBrowser,
    ReviewBrowsingController, ReviewQuery, ReviewSourceError,
};

use super::output::{write_page_summary, write_restaurant_summary};

/// Browses the configured restaurant, label and page.
///
/// The restaurant's per-label ratings are printed first. The first source page is loaded before navigating so the requested page
/// can be clamped against the real total.
///
/// # Errors
///
/// Returns configuration errors for a missing or invalid restaurant, URL or
/// label, and the source error when the details or a review fetch fails.
pub async fn run(config: &ForkfulConfig) -> Result<(), ReviewSourceError> {
    let restaurant = config.restaurant()?;
    let locator = config.locator()?;
    let query = ReviewQuery::new(config.category_label()?, config.text_only);

    let source = HttpReviewSource::new(locator, config.request_timeout())?;
    let summary = source.fetch_details(&restaurant).await?;
    write_restaurant_summary(&restaurant, &summary, query.label)?;

    let telemetry: Arc<dyn TelemetrySink> = if config.telemetry {
        Arc::new(StderrJsonlTelemetrySink)
    } else {
        Arc::new(NoopTelemetrySink)
    };
    let controller = ReviewBrowsingController::with_query(PageSizeConfig::default(), query);
    let mut browser = ReviewBrowser::new(&source, restaurant, controller).with_telemetry(telemetry);

    browser.load().await?;
    browser.request_page(config.page).await?;

    write_page_summary(browser.restaurant(), browser.controller())
}
