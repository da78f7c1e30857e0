//! Output formatting utilities for CLI operations.

use std::io::{self, Write};

use forkful::{
    CategoryLabel, RestaurantId, RestaurantSummary, Review, ReviewBrowsingController,
    ReviewQuery, ReviewSourceError,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display columns reserved for review feedback on one line.
pub const FEEDBACK_WIDTH: usize = 48;

const REVIEW_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Writes the restaurant's per-label ratings to stdout.
///
/// # Errors
///
/// Returns [`ReviewSourceError::Io`] when stdout cannot be written.
pub fn write_restaurant_summary(
    restaurant: &RestaurantId,
    summary: &RestaurantSummary,
    selected: CategoryLabel,
) -> Result<(), ReviewSourceError> {
    let mut stdout = io::stdout().lock();
    write_restaurant_summary_to(&mut stdout, restaurant, summary, selected)
}

/// Writes the restaurant's per-label ratings to the given writer.
///
/// The label being browsed is marked with `>`.
///
/// # Errors
///
/// Returns [`ReviewSourceError::Io`] when the writer fails.
pub fn write_restaurant_summary_to<W: Write>(
    writer: &mut W,
    restaurant: &RestaurantId,
    summary: &RestaurantSummary,
    selected: CategoryLabel,
) -> Result<(), ReviewSourceError> {
    writeln!(
        writer,
        "{} (restaurant {}): {:.1} average from {} reviews",
        summary.name,
        restaurant.as_str(),
        summary.rating.unwrap_or_default(),
        summary.review_count
    )
    .map_err(|e| io_error(&e))?;

    for (label, rating) in summary.labels.by_label() {
        let marker = if label == selected { ">" } else { " " };
        writeln!(
            writer,
            "  {marker} {:<9} {:.1}  ({} reviews)",
            label.as_str(),
            rating.rating,
            rating.count
        )
        .map_err(|e| io_error(&e))?;
    }
    writeln!(writer).map_err(|e| io_error(&e))?;

    Ok(())
}

/// Writes the current page of reviews to stdout.
///
/// # Errors
///
/// Returns [`ReviewSourceError::Io`] when stdout cannot be written.
pub fn write_page_summary(
    restaurant: &RestaurantId,
    controller: &ReviewBrowsingController,
) -> Result<(), ReviewSourceError> {
    let mut stdout = io::stdout().lock();
    write_page_summary_to(&mut stdout, restaurant, controller)
}

/// Writes the current page of reviews to the given writer.
///
/// # Errors
///
/// Returns [`ReviewSourceError::Io`] when the writer fails.
pub fn write_page_summary_to<W: Write>(
    writer: &mut W,
    restaurant: &RestaurantId,
    controller: &ReviewBrowsingController,
) -> Result<(), ReviewSourceError> {
    let query = controller.query();
    let filter = if query.text_only { "yes" } else { "no" };
    writeln!(
        writer,
        "Reviews for restaurant {} (label: {}, text only: {filter})",
        restaurant.as_str(),
        query.label
    )
    .map_err(|e| io_error(&e))?;
    writeln!(writer).map_err(|e| io_error(&e))?;

    let reviews = controller.display_window();
    if reviews.is_empty() {
        writeln!(writer, "  {}", empty_message(query, controller.total_count()))
            .map_err(|e| io_error(&e))?;
    }
    for review in reviews {
        writeln!(writer, "  {}", review_line(review)).map_err(|e| io_error(&e))?;
    }

    let page_info = controller.page_info();
    writeln!(writer).map_err(|e| io_error(&e))?;
    writeln!(
        writer,
        "Page {} of {} ({} reviews total)",
        page_info.current_page(),
        page_info.total_pages().unwrap_or(0).max(1),
        controller.total_count().unwrap_or(0)
    )
    .map_err(|e| io_error(&e))?;

    if page_info.has_next() {
        writeln!(writer, "More pages available.").map_err(|e| io_error(&e))?;
    }

    Ok(())
}

/// Explains an empty page. A query without matches is reported separately
/// for the text-only filter.
const fn empty_message(query: ReviewQuery, total_count: Option<u64>) -> &'static str {
    match (total_count, query.text_only) {
        (Some(0), true) => "No reviews with written feedback for this label.",
        (Some(0), false) => "No reviews for this label.",
        _ => "No reviews on this page.",
    }
}

fn review_line(review: &Review) -> String {
    let author = review.username.as_deref().unwrap_or("anonymous");
    let feedback = if review.has_feedback() {
        truncate_to_display_width(review.feedback.trim(), FEEDBACK_WIDTH)
    } else {
        "(no written feedback)".to_owned()
    };
    format!(
        "{:.1} {:<9} {}  {author}: {feedback}",
        review.rating,
        review.tier().as_str(),
        review.review_time.format(REVIEW_TIME_FORMAT)
    )
}

/// Truncates text to the provided display width and appends an ellipsis.
///
/// Width is measured in terminal columns, not Unicode scalar count. Line
/// breaks are flattened to spaces first.
pub(crate) fn truncate_to_display_width(text: &str, max_width: usize) -> String {
    let flattened = text.replace(['\r', '\n'], " ");
    if flattened.width() <= max_width {
        return flattened;
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let target_width = max_width.saturating_sub(3);
    let mut truncated = String::new();
    let mut current_width = 0;
    for ch in flattened.chars() {
        let char_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + char_width > target_width {
            break;
        }
        truncated.push(ch);
        current_width += char_width;
    }
    format!("{truncated}...")
}

/// Converts an I/O error to a [`ReviewSourceError::Io`].
pub(crate) fn io_error(error: &io::Error) -> ReviewSourceError {
    ReviewSourceError::Io {
        message: error.to_string(),
    }
}
