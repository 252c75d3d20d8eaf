use std::collections::BTreeMap;

use mlm::{
    error::SourceError,
    utils::{deserialize_timestamp, deserialize_truthy, zero_if_invalid},
};
use mlm_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A user somewhere below the root of a referral tree.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferredUser {
    pub user_address: String,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub registration_time: Option<u64>,
    #[serde(default, deserialize_with = "deserialize_truthy")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "zero_if_invalid")]
    pub total_investment: Decimal,
    #[serde(default, deserialize_with = "zero_if_invalid")]
    pub total_earnings: Decimal,
}

/// One investment of a user, as returned by the investments endpoint.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentRecord {
    #[serde(default, deserialize_with = "zero_if_invalid")]
    pub amount: Decimal,
    /// e.g. `"USDT"` or `"TOKEN"`
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub investment_time: Option<u64>,
}

/// Wire shape of the tree endpoint: `{ "tree": { "level1": [...], "level2": [...] } }`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TreeResponse {
    #[serde(default)]
    pub tree: Option<BTreeMap<String, Option<Vec<ReferredUser>>>>,
}

/// Descendants of a root wallet, partitioned by referral depth starting at level 1.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ReferralTree {
    levels: BTreeMap<u32, Vec<ReferredUser>>,
}

impl ReferralTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Level 0 is the root itself and is ignored.
    pub fn from_levels(levels: impl IntoIterator<Item = (u32, Vec<ReferredUser>)>) -> Self {
        let mut tree = ReferralTree::new();
        for (level, users) in levels {
            tree.insert_level(level, users);
        }
        tree
    }

    pub fn from_response(response: TreeResponse) -> Self {
        let mut tree = ReferralTree::new();
        for (key, users) in response.tree.unwrap_or_default() {
            match parse_level_key(&key) {
                Some(level) => tree.insert_level(level, users.unwrap_or_default()),
                None => debug!(key = %key, "Referral: Parse tree: ignoring unrecognized key"),
            }
        }
        tree
    }

    pub fn from_json_str(json: &str) -> Result<Self, SourceError> {
        let response: TreeResponse = serde_json::from_str(json)?;
        Ok(Self::from_response(response))
    }

    pub fn insert_level(&mut self, level: u32, users: Vec<ReferredUser>) {
        if level == 0 {
            return;
        }
        self.levels.entry(level).or_default().extend(users);
    }

    pub fn users_at(&self, level: u32) -> &[ReferredUser] {
        self.levels.get(&level).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Deepest level present in the source, 0 for an empty tree.
    pub fn depth(&self) -> u32 {
        self.levels.keys().next_back().copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.levels.values().all(Vec::is_empty)
    }
}

fn parse_level_key(key: &str) -> Option<u32> {
    let digits = key.strip_prefix("level")?;
    let canonical = !digits.starts_with('0') && digits.bytes().all(|b| b.is_ascii_digit());
    if digits.is_empty() || !canonical {
        return None;
    }
    digits.parse().ok()
}
