use std::time::{SystemTime, UNIX_EPOCH};

use mlm::StakingOrder;
use mlm_decimal::Decimal;

use crate::{
    accrual::{calculate_rewards, RewardBreakdown},
    portfolio::{calculate_summary_rewards, PortfolioSummary},
};

/// Source of the reference "now" in Unix seconds. The caller owns the refresh cadence
/// and re-evaluates with a fresh reading on every tick.
pub trait Clock {
    fn now(&self) -> u64;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        // a clock before the epoch reads as 0, which accrues nothing
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or(0)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now(&self) -> u64 {
        self.0
    }
}

pub fn rewards_at(
    staked_amount: Decimal,
    deposit_timestamp: u64,
    clock: &impl Clock,
) -> RewardBreakdown {
    calculate_rewards(staked_amount, deposit_timestamp, clock.now())
}

pub fn summary_at(orders: &[StakingOrder], clock: &impl Clock) -> PortfolioSummary {
    calculate_summary_rewards(orders, clock.now())
}
