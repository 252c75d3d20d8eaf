use pretty_assertions::assert_eq;
use test_case::test_case;

use super::setup::sample_tree;
use crate::{
    aggregate_levels, build_level_view, LevelViewOptions, ReferralLevelEntry, DEFAULT_MAX_LEVELS,
};

fn levels() -> Vec<ReferralLevelEntry> {
    aggregate_levels(&sample_tree(), DEFAULT_MAX_LEVELS)
}

fn page_levels(active_only: bool, page_size: usize, page: usize) -> Vec<u32> {
    build_level_view(
        &levels(),
        LevelViewOptions {
            active_only,
            page_size,
            page,
        },
    )
    .entries
    .iter()
    .map(|entry| entry.level)
    .collect()
}

#[test]
fn default_view_shows_first_five_levels() {
    let page = build_level_view(&levels(), LevelViewOptions::default());

    assert_eq!(
        page.entries.iter().map(|entry| entry.level).collect::<Vec<_>>(),
        vec![1, 2, 3, 4, 5]
    );
    assert_eq!(page.page, 1);
    assert_eq!(page.page_size, 5);
    assert_eq!(page.total_pages, 5);
    assert_eq!(page.level_count, 21);
}

#[test_case(false, 5, 2, vec![6, 7, 8, 9, 10] ; "second page of all levels")]
#[test_case(false, 5, 5, vec![21] ; "last partial page")]
#[test_case(false, 10, 3, vec![21] ; "larger pages")]
#[test_case(true, 5, 1, vec![1, 2, 5] ; "active levels only")]
#[test_case(true, 2, 2, vec![5] ; "second page of active levels")]
fn pages_through_levels(active_only: bool, page_size: usize, page: usize, expected: Vec<u32>) {
    assert_eq!(page_levels(active_only, page_size, page), expected);
}

#[test]
fn active_filter_changes_the_badge() {
    let page = build_level_view(
        &levels(),
        LevelViewOptions {
            active_only: true,
            ..LevelViewOptions::default()
        },
    );

    assert_eq!(page.level_count, 3);
    assert_eq!(page.total_pages, 1);
}

#[test]
fn page_past_the_end_shows_last_page() {
    let page = build_level_view(
        &levels(),
        LevelViewOptions {
            page: 99,
            ..LevelViewOptions::default()
        },
    );

    assert_eq!(page.page, 5);
    assert_eq!(page.entries.len(), 1);
}

#[test]
fn page_zero_shows_first_page() {
    assert_eq!(page_levels(false, 5, 0), vec![1, 2, 3, 4, 5]);
}

#[test]
fn zero_page_size_is_treated_as_one() {
    let page = build_level_view(
        &levels(),
        LevelViewOptions {
            page_size: 0,
            page: 2,
            ..LevelViewOptions::default()
        },
    );

    assert_eq!(page.page_size, 1);
    assert_eq!(page.total_pages, 21);
    assert_eq!(page.entries[0].level, 2);
}

#[test]
fn empty_view_is_single_empty_page() {
    let empty = aggregate_levels(&Default::default(), DEFAULT_MAX_LEVELS);
    let page = build_level_view(
        &empty,
        LevelViewOptions {
            active_only: true,
            page: 3,
            ..LevelViewOptions::default()
        },
    );

    assert!(page.entries.is_empty());
    assert_eq!(page.page, 1);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.level_count, 0);
}

#[test]
fn page_serializes_in_camel_case() {
    let page = build_level_view(&levels()[..1], LevelViewOptions::default());
    let json = serde_json::to_value(&page).unwrap();

    assert_eq!(json["totalPages"], 1);
    assert_eq!(json["levelCount"], 1);
    assert_eq!(json["entries"][0]["userCount"], 3);
    assert_eq!(json["entries"][0]["totalInvestment"], "600");
}
