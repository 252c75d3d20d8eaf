use mlm::config::DEFAULT_PAGE_SIZE;
use serde::Serialize;

use crate::levels::ReferralLevelEntry;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LevelViewOptions {
    /// Hide levels without users
    pub active_only: bool,
    pub page_size: usize,
    /// 1-based
    pub page: usize,
}

impl Default for LevelViewOptions {
    fn default() -> Self {
        LevelViewOptions {
            active_only: false,
            page_size: DEFAULT_PAGE_SIZE,
            page: 1,
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelPage {
    pub entries: Vec<ReferralLevelEntry>,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    /// Number of levels after filtering, shown as the level badge
    pub level_count: usize,
}

/// Filters and paginates aggregated levels.
///
/// A `page_size` of 0 is treated as 1 and a page past the end shows the last page. An
/// empty result is reported as page 1 of 1.
pub fn build_level_view(entries: &[ReferralLevelEntry], options: LevelViewOptions) -> LevelPage {
    let visible: Vec<&ReferralLevelEntry> = entries
        .iter()
        .filter(|entry| !options.active_only || !entry.is_empty())
        .collect();

    let page_size = options.page_size.max(1);
    let level_count = visible.len();
    let total_pages = level_count.div_ceil(page_size).max(1);
    let page = options.page.clamp(1, total_pages);

    LevelPage {
        entries: visible
            .into_iter()
            .skip((page - 1) * page_size)
            .take(page_size)
            .cloned()
            .collect(),
        page,
        page_size,
        total_pages,
        level_count,
    }
}
