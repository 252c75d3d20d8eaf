mod accrual;
mod clock;
mod portfolio;

pub use accrual::{
    calculate_rewards, calculate_rewards_at_rate, RewardBreakdown, DAILY_REWARD_RATE,
    SECONDS_PER_DAY,
};
pub use clock::{rewards_at, summary_at, Clock, FixedClock, SystemClock};
pub use portfolio::{
    accruing_orders, calculate_order_rewards, calculate_summary_rewards, OrderRewards,
    PortfolioSummary,
};
