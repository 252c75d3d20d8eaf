pub mod config;
pub mod error;
pub mod ttl;
pub mod utils;

use mlm_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single deposit into the staking contract, as reported by the contract layer.
#[derive(Clone, Debug, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakingOrder {
    /// The staked principal, already converted from token smallest units
    #[serde(default, deserialize_with = "utils::zero_if_invalid")]
    pub amount: Decimal,
    /// Unix timestamp (seconds) when the stake started accruing
    #[serde(default, deserialize_with = "utils::timestamp_or_zero")]
    pub deposit_time: u64,
    /// Inactive orders have been withdrawn and no longer accrue
    #[serde(default, deserialize_with = "utils::deserialize_truthy")]
    pub is_active: bool,
}

impl StakingOrder {
    pub fn new(amount: Decimal, deposit_time: u64, is_active: bool) -> Self {
        StakingOrder {
            amount,
            deposit_time,
            is_active,
        }
    }

    /// Builds an order from the contract's raw integer amount. Amounts that do not fit a
    /// [`Decimal`] are treated as zero, which excludes the order from accrual.
    pub fn from_token_units(
        amount_atomics: u128,
        token_decimals: u32,
        deposit_time: u64,
        is_active: bool,
    ) -> Self {
        let amount = Decimal::from_atomics(amount_atomics, token_decimals).unwrap_or_default();
        StakingOrder::new(amount, deposit_time, is_active)
    }

    /// Whether this order takes part in reward accrual at all.
    pub fn is_accruing(&self) -> bool {
        self.is_active && self.deposit_time > 0 && self.amount.is_positive()
    }
}
