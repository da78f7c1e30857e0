//! Unit tests for the review browsing controller.

use rstest::{fixture, rstest};

use super::{FetchOutcome, ReviewBrowsingController};
use crate::browser::query::{FetchTicket, ReviewQuery};
use crate::reviews::error::ReviewSourceError;
use crate::reviews::models::CategoryLabel;
use crate::reviews::models::test_support::{rating_ids, review_block};
use crate::reviews::pagination::PageSizeConfig;

const FOOD: ReviewQuery = ReviewQuery::new(CategoryLabel::Food, false);
const SERVICE: ReviewQuery = ReviewQuery::new(CategoryLabel::Service, false);

const fn ticket(query: ReviewQuery, source_page: u32) -> FetchTicket {
    FetchTicket { query, source_page }
}

/// Builds the block the service would return for `source_page` of a result
/// set with `total` records, using 24 records per source page.
fn block_for(label: CategoryLabel, source_page: u32, total: u64) -> crate::reviews::ReviewBlock {
    let first = u64::from(source_page - 1) * 24 + 1;
    let last = (first + 23).min(total);
    if first > total {
        return review_block(label, 1..=0, total);
    }
    review_block(label, first..=last, total)
}

#[fixture]
fn controller() -> ReviewBrowsingController {
    ReviewBrowsingController::new(PageSizeConfig::default())
}

/// Controller with page 1 of the food query loaded from `total` records.
fn loaded(total: u64) -> ReviewBrowsingController {
    let mut controller = ReviewBrowsingController::new(PageSizeConfig::default());
    let first = controller.load().expect("initial load needs a fetch");
    let outcome = controller.complete_fetch(first, Ok(block_for(CategoryLabel::Food, 1, total)));
    assert_eq!(outcome, FetchOutcome::Applied);
    controller
}

#[rstest]
fn initial_load_requests_first_source_page(mut controller: ReviewBrowsingController) {
    assert!(controller.display_window().is_empty());

    let first = controller.load();

    assert_eq!(first, Some(ticket(FOOD, 1)));
    assert!(controller.is_loading());
    assert_eq!(controller.current_client_page(), 1);
    assert_eq!(controller.max_client_page(), 0);
}

#[test]
fn first_page_shows_first_window() {
    let controller = loaded(30);

    assert_eq!(rating_ids(controller.display_window()), vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(controller.max_client_page(), 5);
    assert!(!controller.is_loading());
}

#[test]
fn paging_inside_a_source_page_needs_no_fetch() {
    let mut controller = loaded(30);

    let next = controller.request_page(4);

    assert_eq!(next, None);
    assert!(!controller.is_loading());
    assert_eq!(
        rating_ids(controller.display_window()),
        vec![19, 20, 21, 22, 23, 24]
    );
}

#[test]
fn paging_across_source_pages_fetches_the_next_block() {
    let mut controller = loaded(50);

    let next = controller.request_page(5).expect("page 5 lives on source page 2");
    assert_eq!(next, ticket(FOOD, 2));
    assert!(controller.is_loading());
    assert!(controller.display_window().is_empty(), "block for page 5 not loaded yet");

    let outcome = controller.complete_fetch(next, Ok(block_for(CategoryLabel::Food, 2, 50)));

    assert_eq!(outcome, FetchOutcome::Applied);
    assert_eq!(
        rating_ids(controller.display_window()),
        vec![25, 26, 27, 28, 29, 30]
    );
}

#[test]
fn eighth_page_uses_last_window_of_second_source_page() {
    let mut controller = loaded(60);
    let next = controller.request_page(8).expect("page 8 lives on source page 2");
    controller.complete_fetch(next, Ok(block_for(CategoryLabel::Food, 2, 60)));

    assert_eq!(
        rating_ids(controller.display_window()),
        vec![43, 44, 45, 46, 47, 48]
    );
}

#[rstest]
#[case::past_the_end(9, 5)]
#[case::zero(0, 1)]
#[case::in_range(3, 3)]
fn request_page_clamps_to_known_total(#[case] requested: u32, #[case] expected: u32) {
    let mut controller = loaded(30);

    controller.request_page(requested);

    assert_eq!(controller.current_client_page(), expected);
}

#[rstest]
fn request_page_without_a_known_total_stays_on_first_page(
    mut controller: ReviewBrowsingController,
) {
    controller.request_page(4);

    assert_eq!(controller.current_client_page(), 1);
}

#[test]
fn label_change_resets_page_and_hides_previous_block() {
    let mut controller = loaded(30);
    controller.request_page(3);

    let next = controller.select_label(CategoryLabel::Service);

    assert_eq!(next, Some(ticket(SERVICE, 1)));
    assert_eq!(controller.current_client_page(), 1);
    assert!(controller.display_window().is_empty(), "food block must not leak");
    assert_eq!(controller.max_client_page(), 0, "total is per query");
}

#[test]
fn text_only_toggle_resets_page() {
    let mut controller = loaded(30);
    controller.request_page(2);

    let next = controller.set_text_only(true);

    assert_eq!(
        next,
        Some(ticket(ReviewQuery::new(CategoryLabel::Food, true), 1))
    );
    assert_eq!(controller.current_client_page(), 1);
}

#[test]
fn request_page_after_filter_change_clamps_to_first_page() {
    let mut controller = loaded(30);
    controller.select_label(CategoryLabel::Service);

    let next = controller.request_page(5);

    assert_eq!(controller.current_client_page(), 1);
    assert_eq!(next, Some(ticket(SERVICE, 1)));
}

#[test]
fn shrinking_total_resets_to_first_page_and_refetches() {
    let mut controller = loaded(30);
    let second = controller.request_page(5).expect("page 5 needs source page 2");
    controller.complete_fetch(second, Ok(block_for(CategoryLabel::Food, 2, 30)));
    assert_eq!(controller.display_window().len(), 6);

    assert_eq!(
        controller.retry(),
        None,
        "block for the current ticket is already loaded"
    );
    let refresh = controller.refresh();
    assert_eq!(refresh, ticket(FOOD, 2));
    assert!(controller.is_loading());

    let outcome = controller.complete_fetch(refresh, Ok(block_for(CategoryLabel::Food, 2, 10)));

    assert_eq!(
        outcome,
        FetchOutcome::Reconciled {
            from_page: 5,
            refetch: Some(ticket(FOOD, 1)),
        }
    );
    assert_eq!(controller.current_client_page(), 1);
    assert!(controller.is_loading());
    assert!(controller.display_window().is_empty());

    let settled = controller.complete_fetch(ticket(FOOD, 1), Ok(block_for(CategoryLabel::Food, 1, 10)));
    assert_eq!(settled, FetchOutcome::Applied);
    assert_eq!(rating_ids(controller.display_window()), vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(controller.max_client_page(), 2);
}

#[test]
fn reconciliation_inside_the_first_source_page_reuses_the_block() {
    let mut controller = loaded(30);
    controller.request_page(4);

    let outcome = controller.complete_fetch(ticket(FOOD, 1), Ok(block_for(CategoryLabel::Food, 1, 8)));

    assert_eq!(
        outcome,
        FetchOutcome::Reconciled {
            from_page: 4,
            refetch: None,
        }
    );
    assert_eq!(rating_ids(controller.display_window()), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn empty_result_keeps_page_without_reconciling() {
    let mut controller = loaded(30);
    controller.request_page(3);

    let outcome = controller.complete_fetch(ticket(FOOD, 1), Ok(block_for(CategoryLabel::Food, 1, 0)));

    assert_eq!(outcome, FetchOutcome::Applied);
    assert_eq!(controller.current_client_page(), 3);
    assert_eq!(controller.max_client_page(), 0);
    assert!(controller.display_window().is_empty());
    assert!(!controller.is_loading());
}

#[test]
fn zero_total_on_first_load_shows_nothing() {
    let controller = loaded(0);

    assert_eq!(controller.max_client_page(), 0);
    assert!(controller.display_window().is_empty());
    assert_eq!(controller.page_info().total_pages(), Some(0));
}

#[rstest]
#[case::remainder(15, 3, 3)]
#[case::exact(18, 3, 6)]
fn last_page_window_has_remainder_length(
    #[case] total: u64,
    #[case] last_page: u32,
    #[case] expected_len: usize,
) {
    let mut controller = loaded(total);

    controller.request_page(last_page);

    assert_eq!(controller.display_window().len(), expected_len);
}

#[test]
fn display_window_is_idempotent() {
    let mut controller = loaded(30);
    controller.request_page(2);

    let first = controller.display_window().to_vec();
    let second = controller.display_window().to_vec();

    assert_eq!(first, second);
}

#[test]
fn late_response_for_previous_query_is_discarded() {
    let mut controller = loaded(60);
    let stale = controller.request_page(5).expect("source page 2 fetch");
    let fresh = controller
        .select_label(CategoryLabel::Service)
        .expect("new label needs a fetch");

    let fresh_outcome = controller.complete_fetch(fresh, Ok(block_for(CategoryLabel::Service, 1, 12)));
    let stale_outcome = controller.complete_fetch(stale, Ok(block_for(CategoryLabel::Food, 2, 60)));

    assert_eq!(fresh_outcome, FetchOutcome::Applied);
    assert_eq!(stale_outcome, FetchOutcome::Discarded);
    let window = controller.display_window();
    assert_eq!(window.len(), 6);
    assert!(window.iter().all(|review| review.label == CategoryLabel::Service));
    assert_eq!(controller.max_client_page(), 2);
}

#[test]
fn stale_failure_is_discarded_without_recording_an_error() {
    let mut controller = loaded(60);
    let stale = controller.request_page(5).expect("source page 2 fetch");
    controller.request_page(1);

    let outcome = controller.complete_fetch(
        stale,
        Err(ReviewSourceError::Network {
            message: "timeout".to_owned(),
        }),
    );

    assert_eq!(outcome, FetchOutcome::Discarded);
    assert_eq!(controller.last_error(), None);
    assert_eq!(controller.display_window().len(), 6);
}

#[test]
fn failure_keeps_previous_block_and_surfaces_error() {
    let mut controller = loaded(60);
    let next = controller.request_page(5).expect("source page 2 fetch");
    let error = ReviewSourceError::Api {
        status: 502,
        message: "bad gateway".to_owned(),
    };

    let outcome = controller.complete_fetch(next, Err(error.clone()));

    assert_eq!(outcome, FetchOutcome::Failed(error.clone()));
    assert_eq!(controller.last_error(), Some(&error));
    assert!(!controller.is_loading());
    assert_eq!(controller.max_client_page(), 10, "previous total survives");
    assert!(controller.display_window().is_empty(), "no block for page 5 yet");

    controller.request_page(1);
    assert_eq!(controller.display_window().len(), 6, "previous block still shown");
    assert_eq!(controller.last_error(), None);
}

#[test]
fn retry_reissues_the_failed_ticket() {
    let mut controller = loaded(60);
    let next = controller.request_page(5).expect("source page 2 fetch");
    controller.complete_fetch(
        next,
        Err(ReviewSourceError::Network {
            message: "reset".to_owned(),
        }),
    );

    let retried = controller.retry();

    assert_eq!(retried, Some(next));
    assert!(controller.is_loading());
    assert_eq!(controller.last_error(), None);
}

#[test]
fn page_info_reflects_navigation_state() {
    let mut controller = loaded(30);
    controller.request_page(2);

    let info = controller.page_info();

    assert_eq!(info.current_page(), 2);
    assert_eq!(info.per_page(), 6);
    assert_eq!(info.total_pages(), Some(5));
    assert!(info.has_next());
    assert!(info.has_prev());
}

#[test]
fn custom_page_sizes_drive_the_window() {
    let sizes = PageSizeConfig::new(5, 10).expect("5 divides 10");
    let mut controller = ReviewBrowsingController::with_query(sizes, SERVICE);
    let first = controller.load().expect("initial fetch");
    controller.complete_fetch(first, Ok(review_block(CategoryLabel::Service, 1..=10, 23)));

    assert_eq!(controller.request_page(2), None);
    assert_eq!(
        rating_ids(controller.display_window()),
        vec![6, 7, 8, 9, 10]
    );
    assert_eq!(controller.request_page(3), Some(ticket(SERVICE, 2)));
}

#[test]
fn retry_after_failed_refresh_fetches_again() {
    let mut controller = loaded(30);
    let refresh = controller.refresh();
    controller.complete_fetch(
        refresh,
        Err(ReviewSourceError::Network {
            message: "reset".to_owned(),
        }),
    );
    assert!(controller.last_error().is_some());

    let retried = controller.retry();

    assert_eq!(retried, Some(ticket(FOOD, 1)));
    assert!(controller.is_loading());
    assert_eq!(controller.last_error(), None);
}

#[test]
fn returning_to_a_previous_label_fetches_its_block_again() {
    let mut controller = loaded(30);
    let service = controller.select_label(CategoryLabel::Service);
    assert_eq!(service, Some(ticket(SERVICE, 1)));

    let food = controller.select_label(CategoryLabel::Food);

    assert_eq!(food, Some(ticket(FOOD, 1)));
    assert!(controller.is_loading());
    assert!(controller.display_window().is_empty(), "old food block was dropped");

    let late = controller.complete_fetch(
        service.expect("service ticket"),
        Ok(block_for(CategoryLabel::Service, 1, 12)),
    );
    assert_eq!(late, FetchOutcome::Discarded);
}

#[test]
fn toggling_text_only_twice_fetches_again() {
    let mut controller = loaded(30);
    controller.set_text_only(true);

    let unfiltered = controller.set_text_only(false);

    assert_eq!(unfiltered, Some(ticket(FOOD, 1)));
    assert_eq!(controller.max_client_page(), 0);
}

#[test]
fn reselecting_the_current_label_keeps_the_block() {
    let mut controller = loaded(30);
    controller.request_page(3);

    let next = controller.select_label(CategoryLabel::Food);

    assert_eq!(next, None);
    assert_eq!(controller.current_client_page(), 1);
    assert_eq!(controller.display_window().len(), 6);
}
