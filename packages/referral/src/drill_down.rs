use std::time::Duration;

use futures::future::join_all;
use mlm::error::SourceError;
use mlm_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    error::ReferralError,
    source::{InvestmentSource, ReferralTreeSource},
    tree::{InvestmentRecord, ReferredUser},
};

/// A level user together with their own investments.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelUserDetail {
    #[serde(flatten)]
    pub user: ReferredUser,
    pub investments: Vec<InvestmentRecord>,
    pub total_investment_amount: Decimal,
}

impl LevelUserDetail {
    pub fn new(user: ReferredUser, investments: Vec<InvestmentRecord>) -> Self {
        let total_investment_amount = investments
            .iter()
            .fold(Decimal::zero(), |total, investment| {
                total.saturating_add(investment.amount)
            });

        LevelUserDetail {
            user,
            investments,
            total_investment_amount,
        }
    }

    /// Detail of a user whose investments could not be fetched.
    pub fn without_investments(user: ReferredUser) -> Self {
        Self::new(user, Vec::new())
    }
}

/// Lists the users of `level` below `root` with their investments.
///
/// Investment lookups run concurrently, each bounded by `timeout`. A failed or timed out
/// lookup only affects its own user, who is reported with no investments. Failing to
/// fetch the level itself is an error. Output keeps the order of the level's users.
pub async fn drill_down_level<T, I>(
    tree_source: &T,
    investment_source: &I,
    root: &str,
    level: u32,
    max_levels: u32,
    timeout: Duration,
) -> Result<Vec<LevelUserDetail>, ReferralError>
where
    T: ReferralTreeSource + ?Sized,
    I: InvestmentSource + ?Sized,
{
    if level == 0 || level > max_levels {
        return Err(ReferralError::InvalidLevel { level, max_levels });
    }

    let users = tree_source.fetch_level(root, level).await?;
    debug!(
        root,
        level,
        users = users.len(),
        "Referral: Drill down: fetching investments"
    );

    let lookups = users
        .into_iter()
        .map(|user| user_detail(investment_source, user, timeout));

    Ok(join_all(lookups).await)
}

async fn user_detail<I>(
    investment_source: &I,
    user: ReferredUser,
    timeout: Duration,
) -> LevelUserDetail
where
    I: InvestmentSource + ?Sized,
{
    let fetch = investment_source.fetch_investments(&user.user_address);
    let lookup = tokio::time::timeout(timeout, fetch);
    let result = match lookup.await {
        Ok(result) => result,
        Err(_) => Err(SourceError::Timeout(timeout)),
    };

    match result {
        Ok(investments) => LevelUserDetail::new(user, investments),
        Err(err) => {
            warn!(
                user = %user.user_address,
                error = %err,
                "Referral: Drill down: investment lookup failed, reporting no investments"
            );
            LevelUserDetail::without_investments(user)
        }
    }
}
