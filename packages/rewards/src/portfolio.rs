use mlm::StakingOrder;
use mlm_decimal::Decimal;
use serde::Serialize;

use crate::accrual::{calculate_rewards, RewardBreakdown, DAILY_REWARD_RATE};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_staked: Decimal,
    pub total_rewards: Decimal,
    /// `total_staked + total_rewards`
    pub total_value: Decimal,
    pub active_orders: usize,
    /// Projection of one full day across all active orders
    pub expected_daily_reward: Decimal,
}

/// Accrual of a single order, `index` pointing back into the input slice.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRewards {
    pub index: usize,
    pub amount: Decimal,
    pub rewards: RewardBreakdown,
}

/// Evaluates every order that takes part in accrual (active, non-zero amount and
/// deposit time) against the shared `now_timestamp`.
pub fn accruing_orders(
    orders: &[StakingOrder],
    now_timestamp: u64,
) -> impl Iterator<Item = OrderRewards> + '_ {
    orders
        .iter()
        .enumerate()
        .filter(|(_, order)| order.is_accruing())
        .map(move |(index, order)| OrderRewards {
            index,
            amount: order.amount,
            rewards: calculate_rewards(order.amount, order.deposit_time, now_timestamp),
        })
}

pub fn calculate_order_rewards(orders: &[StakingOrder], now_timestamp: u64) -> Vec<OrderRewards> {
    accruing_orders(orders, now_timestamp).collect()
}

/// Portfolio totals over the accruing orders. Empty or fully inactive input yields the
/// all-zero summary.
pub fn calculate_summary_rewards(orders: &[StakingOrder], now_timestamp: u64) -> PortfolioSummary {
    let mut summary = accruing_orders(orders, now_timestamp).fold(
        PortfolioSummary::default(),
        |mut summary, order| {
            summary.total_staked = summary.total_staked.saturating_add(order.amount);
            summary.total_rewards = summary
                .total_rewards
                .saturating_add(order.rewards.total_rewards);
            summary.active_orders += 1;
            summary
        },
    );

    summary.total_value = summary.total_staked.saturating_add(summary.total_rewards);
    summary.expected_daily_reward = summary.total_staked.saturating_mul(DAILY_REWARD_RATE);
    summary
}
