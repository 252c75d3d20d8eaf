use std::{sync::Arc, time::Duration};

use mlm::error::SourceError;
use pretty_assertions::assert_eq;

use super::setup::{
    investment, sample_tree, user, FailingTreeSource, MapInvestmentSource, StaticTreeSource,
    ROOT,
};
use crate::{
    CachedInvestmentSource, CachedTreeSource, FallbackTreeSource, InvestmentSource, ReferralTree,
    ReferralTreeSource,
};

#[tokio::test]
async fn default_fetch_level_goes_through_the_tree() {
    let source = FailingTreeSource::unavailable("down");
    let err = source.fetch_level(ROOT, 1).await.unwrap_err();

    assert_eq!(err, SourceError::Unavailable("down".to_string()));
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn boxed_and_shared_sources_forward_calls() {
    let shared = Arc::new(StaticTreeSource::new(sample_tree()));
    let boxed: Box<dyn ReferralTreeSource> = Box::new(Arc::clone(&shared));

    assert_eq!(boxed.fetch_tree(ROOT).await.unwrap(), sample_tree());
    assert_eq!(boxed.fetch_level(ROOT, 2).await.unwrap(), vec![user("0xb1", 50, 5)]);
    assert_eq!(shared.tree_calls(), 1);
    assert_eq!(shared.level_calls(), 1);
}

#[tokio::test]
async fn fallback_uses_first_successful_strategy() {
    let primary = Arc::new(FailingTreeSource::new(SourceError::Timeout(Duration::from_secs(15))));
    let secondary = Arc::new(StaticTreeSource::new(sample_tree()));
    let never_reached = Arc::new(StaticTreeSource::new(ReferralTree::new()));

    let source = FallbackTreeSource::new()
        .with_strategy("optimized", Arc::clone(&primary))
        .with_strategy("regular", Arc::clone(&secondary))
        .with_strategy("legacy", Arc::clone(&never_reached));

    assert_eq!(source.len(), 3);
    assert_eq!(source.fetch_tree(ROOT).await.unwrap(), sample_tree());
    assert_eq!(source.fetch_level(ROOT, 1).await.unwrap().len(), 3);
    assert_eq!(primary.calls(), 2);
    assert_eq!(secondary.tree_calls(), 1);
    assert_eq!(secondary.level_calls(), 1);
    assert_eq!(never_reached.tree_calls(), 0);
}

#[tokio::test]
async fn fallback_returns_last_error_when_all_fail() {
    let source = FallbackTreeSource::new()
        .with_strategy("optimized", FailingTreeSource::unavailable("optimized down"))
        .with_strategy("regular", FailingTreeSource::unavailable("regular down"));

    assert_eq!(
        source.fetch_tree(ROOT).await.unwrap_err(),
        SourceError::Unavailable("regular down".to_string())
    );
    assert_eq!(
        source.fetch_level(ROOT, 1).await.unwrap_err(),
        SourceError::Unavailable("regular down".to_string())
    );
}

#[tokio::test]
async fn fallback_without_strategies_has_no_sources() {
    let source = FallbackTreeSource::new();

    assert!(source.is_empty());
    assert_eq!(source.fetch_tree(ROOT).await.unwrap_err(), SourceError::NoSources);
}

#[tokio::test(start_paused = true)]
async fn cached_tree_is_reused_until_expiry() {
    let upstream = Arc::new(StaticTreeSource::new(sample_tree()));
    let source = CachedTreeSource::new(Arc::clone(&upstream), Duration::from_secs(300));

    source.fetch_tree(ROOT).await.unwrap();
    source.fetch_tree(&ROOT.to_uppercase()).await.unwrap();
    assert_eq!(upstream.tree_calls(), 1);

    tokio::time::advance(Duration::from_secs(301)).await;
    source.fetch_tree(ROOT).await.unwrap();
    assert_eq!(upstream.tree_calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn cached_level_is_served_from_cached_tree() {
    let upstream = Arc::new(StaticTreeSource::new(sample_tree()));
    let source = CachedTreeSource::with_default_ttl(Arc::clone(&upstream));

    source.fetch_tree(ROOT).await.unwrap();
    let users = source.fetch_level(ROOT, 1).await.unwrap();

    assert_eq!(users.len(), 3);
    assert_eq!(upstream.level_calls(), 0);
    assert_eq!(source.ttl(), Duration::from_secs(300));
}

#[tokio::test(start_paused = true)]
async fn cached_levels_are_keyed_by_level() {
    let upstream = Arc::new(StaticTreeSource::new(sample_tree()));
    let source = CachedTreeSource::with_default_ttl(Arc::clone(&upstream));

    source.fetch_level(ROOT, 1).await.unwrap();
    source.fetch_level(ROOT, 1).await.unwrap();
    source.fetch_level(ROOT, 2).await.unwrap();

    assert_eq!(upstream.level_calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn invalidate_drops_only_that_root() {
    let upstream = Arc::new(StaticTreeSource::new(sample_tree()));
    let source = CachedTreeSource::with_default_ttl(Arc::clone(&upstream));

    source.fetch_level(ROOT, 2).await.unwrap();
    source.fetch_tree(ROOT).await.unwrap();
    source.fetch_tree("0xOther").await.unwrap();
    assert_eq!(upstream.level_calls(), 1);

    source.invalidate(ROOT);
    source.fetch_tree("0xOther").await.unwrap();
    assert_eq!(upstream.tree_calls(), 2);

    source.fetch_level(ROOT, 2).await.unwrap();
    source.fetch_tree(ROOT).await.unwrap();
    assert_eq!(upstream.level_calls(), 2);
    assert_eq!(upstream.tree_calls(), 3);
}

#[tokio::test]
async fn failures_are_not_cached() {
    let upstream = Arc::new(FailingTreeSource::unavailable("down"));
    let source = CachedTreeSource::with_default_ttl(Arc::clone(&upstream));

    assert!(source.fetch_tree(ROOT).await.is_err());
    assert!(source.fetch_tree(ROOT).await.is_err());
    assert_eq!(upstream.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn cached_investments_expire() {
    let upstream = Arc::new(
        MapInvestmentSource::new().with_records("0xa1", vec![investment("100", "USDT")]),
    );
    let source = CachedInvestmentSource::with_default_ttl(Arc::clone(&upstream));

    let first = source.fetch_investments("0xa1").await.unwrap();
    let second = source.fetch_investments("0xA1").await.unwrap();
    assert_eq!(first, vec![investment("100", "USDT")]);
    assert_eq!(second, first);
    assert_eq!(upstream.calls(), 1);

    tokio::time::advance(Duration::from_secs(61)).await;
    source.fetch_investments("0xa1").await.unwrap();
    assert_eq!(upstream.calls(), 2);

    source.invalidate("0xA1");
    source.fetch_investments("0xa1").await.unwrap();
    assert_eq!(upstream.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn expired_investments_are_swept_on_insert() {
    let source = CachedInvestmentSource::with_default_ttl(MapInvestmentSource::new());

    for index in 0..50 {
        source.fetch_investments(&format!("0xuser{index}")).await.unwrap();
    }
    assert_eq!(source.entry_count(), 50);

    tokio::time::advance(Duration::from_secs(3_600)).await;
    source.fetch_investments("0xnew").await.unwrap();
    assert_eq!(source.entry_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn expired_trees_of_other_roots_are_swept() {
    let upstream = StaticTreeSource::new(sample_tree());
    let source = CachedTreeSource::new(upstream, Duration::from_secs(300));

    source.fetch_tree("0xfirst").await.unwrap();
    source.fetch_tree("0xsecond").await.unwrap();
    source.fetch_level("0xthird", 2).await.unwrap();
    assert_eq!(source.entry_count(), 3);

    tokio::time::advance(Duration::from_secs(301)).await;
    source.fetch_tree(ROOT).await.unwrap();
    source.fetch_level("0xfourth", 1).await.unwrap();
    assert_eq!(source.entry_count(), 2);
}
