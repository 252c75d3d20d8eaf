use mlm_decimal::Decimal;
use num_integer::Integer;
use serde::Serialize;
use tracing::warn;

pub const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// 0.5% of the principal per full day.
pub const DAILY_REWARD_RATE: Decimal = Decimal::permille(5);

/// Reward accrued by one stake at a reference time. Recomputed on every evaluation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardBreakdown {
    /// Rewards of all complete days since the deposit
    pub past_rewards: Decimal,
    /// Share of the current, incomplete day, accrued per second
    pub today_rewards: Decimal,
    pub total_rewards: Decimal,
    /// Elapsed part of the current day in percent, within `[0, 100)`
    pub day_progress: Decimal,
    pub days_staked: u64,
    /// Nominal reward for one full day; a projection, not an accrued amount
    pub expected_daily_reward: Decimal,
    pub seconds_into_day: u64,
}

impl RewardBreakdown {
    /// Countdown until the next full day is credited to `past_rewards`.
    pub fn seconds_until_next_day(&self) -> u64 {
        SECONDS_PER_DAY - self.seconds_into_day
    }
}

/// Reward accrued by `staked_amount` between `deposit_timestamp` and `now_timestamp` at
/// [`DAILY_REWARD_RATE`].
///
/// The daily reward is spread linearly over the seconds of each day, so exactly one
/// day's reward has accrued whenever a day boundary is crossed. Degenerate inputs never
/// fail: a non-positive amount or a zero deposit time yields the all-zero breakdown, and a
/// deposit in the future yields zero accrual with the nominal daily reward still reported.
pub fn calculate_rewards(
    staked_amount: Decimal,
    deposit_timestamp: u64,
    now_timestamp: u64,
) -> RewardBreakdown {
    calculate_rewards_at_rate(
        staked_amount,
        deposit_timestamp,
        now_timestamp,
        DAILY_REWARD_RATE,
    )
}

pub fn calculate_rewards_at_rate(
    staked_amount: Decimal,
    deposit_timestamp: u64,
    now_timestamp: u64,
    daily_rate: Decimal,
) -> RewardBreakdown {
    if !staked_amount.is_positive() || deposit_timestamp == 0 {
        return RewardBreakdown::default();
    }

    let expected_daily_reward = staked_amount
        .checked_mul(daily_rate)
        .unwrap_or_else(|| saturated("expected_daily_reward"));

    // clock skew or a deposit that is not mined yet
    let Some(elapsed_seconds) = now_timestamp.checked_sub(deposit_timestamp) else {
        return RewardBreakdown {
            expected_daily_reward,
            ..RewardBreakdown::default()
        };
    };

    let (days_staked, seconds_into_day) = elapsed_seconds.div_rem(&SECONDS_PER_DAY);

    let past_rewards = expected_daily_reward
        .checked_mul_int(days_staked)
        .unwrap_or_else(|| saturated("past_rewards"));
    let today_rewards = expected_daily_reward
        .multiply_ratio(seconds_into_day, SECONDS_PER_DAY)
        .unwrap_or_else(|| saturated("today_rewards"));
    let day_progress = Decimal::from_int(100)
        .multiply_ratio(seconds_into_day, SECONDS_PER_DAY)
        .unwrap_or_default();

    RewardBreakdown {
        past_rewards,
        today_rewards,
        total_rewards: past_rewards.saturating_add(today_rewards),
        day_progress,
        days_staked,
        expected_daily_reward,
        seconds_into_day,
    }
}

fn saturated(field: &'static str) -> Decimal {
    warn!(
        field,
        "Rewards: Calculate rewards: arithmetic overflow, saturating at maximum"
    );
    Decimal::MAX
}
