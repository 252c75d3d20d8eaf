use std::time::Duration;

use serde::Deserialize;

use crate::{
    error::ConfigError,
    ttl::{DEFAULT_CACHE_TTL, DEFAULT_LOOKUP_TIMEOUT, TREE_CACHE_TTL},
    StakingOrder,
};

pub const DEFAULT_MAX_LEVELS: u32 = 21;
pub const MAX_SUPPORTED_LEVELS: u32 = 64;
pub const DEFAULT_PAGE_SIZE: usize = 5;
pub const DEFAULT_TOKEN_DECIMALS: u32 = 18;

#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Depth of the referral tree shown to the user
    pub max_levels: u32,
    /// Number of level rows per page of the level view
    pub page_size: usize,
    /// Timeout for a single per-user investment lookup
    pub lookup_timeout_secs: u64,
    /// Decimals of the staked token, used to convert contract amounts
    pub token_decimals: u32,
    pub default_cache_ttl_secs: u64,
    pub tree_cache_ttl_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_levels: DEFAULT_MAX_LEVELS,
            page_size: DEFAULT_PAGE_SIZE,
            lookup_timeout_secs: DEFAULT_LOOKUP_TIMEOUT.as_secs(),
            token_decimals: DEFAULT_TOKEN_DECIMALS,
            default_cache_ttl_secs: DEFAULT_CACHE_TTL.as_secs(),
            tree_cache_ttl_secs: TREE_CACHE_TTL.as_secs(),
        }
    }
}

impl Config {
    /// Parses a JSON config, filling absent fields with defaults, and validates it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json).map_err(|_| ConfigError::Malformed)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_levels == 0 || self.max_levels > MAX_SUPPORTED_LEVELS {
            return Err(ConfigError::InvalidMaxLevels);
        }
        if self.page_size == 0 {
            return Err(ConfigError::InvalidPageSize);
        }
        if !(1..=300).contains(&self.lookup_timeout_secs) {
            return Err(ConfigError::InvalidLookupTimeout);
        }
        if self.token_decimals > 36 {
            return Err(ConfigError::InvalidTokenDecimals);
        }
        if self.default_cache_ttl_secs == 0 || self.tree_cache_ttl_secs == 0 {
            return Err(ConfigError::InvalidCacheTtl);
        }
        Ok(())
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup_timeout_secs)
    }

    pub fn default_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.default_cache_ttl_secs)
    }

    pub fn tree_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.tree_cache_ttl_secs)
    }

    /// Order from a raw contract amount in units of the configured staking token.
    pub fn staking_order(
        &self,
        amount_atomics: u128,
        deposit_time: u64,
        is_active: bool,
    ) -> StakingOrder {
        StakingOrder::from_token_units(amount_atomics, self.token_decimals, deposit_time, is_active)
    }
}
