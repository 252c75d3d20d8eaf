use mlm_decimal::Decimal;
use serde::Serialize;

use crate::tree::{ReferralTree, ReferredUser};

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralLevelEntry {
    pub level: u32,
    pub users: Vec<ReferredUser>,
    pub user_count: usize,
    pub total_investment: Decimal,
    pub total_earnings: Decimal,
}

impl ReferralLevelEntry {
    pub fn from_users(level: u32, users: Vec<ReferredUser>) -> Self {
        let (total_investment, total_earnings) = users.iter().fold(
            (Decimal::zero(), Decimal::zero()),
            |(investment, earnings), user| {
                (
                    investment.saturating_add(user.total_investment),
                    earnings.saturating_add(user.total_earnings),
                )
            },
        );

        ReferralLevelEntry {
            level,
            user_count: users.len(),
            users,
            total_investment,
            total_earnings,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.user_count == 0
    }
}

/// Aggregates levels `1..=max_levels` of `tree`. Always returns exactly `max_levels`
/// entries in level order; levels missing from the tree are all-zero.
pub fn aggregate_levels(tree: &ReferralTree, max_levels: u32) -> Vec<ReferralLevelEntry> {
    (1..=max_levels)
        .map(|level| ReferralLevelEntry::from_users(level, tree.users_at(level).to_vec()))
        .collect()
}

/// Whole-team figures shown above the level list.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamTotals {
    pub total_users: usize,
    pub total_investment: Decimal,
    pub total_earnings: Decimal,
    /// Levels with at least one user
    pub active_levels: usize,
}

impl TeamTotals {
    pub fn from_levels(levels: &[ReferralLevelEntry]) -> Self {
        levels
            .iter()
            .fold(TeamTotals::default(), |mut totals, entry| {
                totals.total_users += entry.user_count;
                totals.total_investment =
                    totals.total_investment.saturating_add(entry.total_investment);
                totals.total_earnings = totals.total_earnings.saturating_add(entry.total_earnings);
                if !entry.is_empty() {
                    totals.active_levels += 1;
                }
                totals
            })
    }
}
