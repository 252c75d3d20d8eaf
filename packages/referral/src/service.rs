use mlm::config::Config;
use tracing::info;

use crate::{
    cache::{CachedInvestmentSource, CachedTreeSource},
    drill_down::{drill_down_level, LevelUserDetail},
    error::ReferralError,
    levels::{aggregate_levels, ReferralLevelEntry, TeamTotals},
    source::{InvestmentSource, ReferralTreeSource},
    view::{build_level_view, LevelPage, LevelViewOptions},
};

/// Entry point of the referral dashboard: wires the data sources to aggregation, the
/// paginated view and the drill-down using one validated [`Config`].
pub struct ReferralService<T, I> {
    tree_source: T,
    investment_source: I,
    config: Config,
}

impl<T: ReferralTreeSource, I: InvestmentSource> ReferralService<T, I> {
    pub fn new(
        tree_source: T,
        investment_source: I,
        config: Config,
    ) -> Result<Self, ReferralError> {
        config.validate()?;
        info!(
            max_levels = config.max_levels,
            page_size = config.page_size,
            "Referral: Service: initialized"
        );

        Ok(ReferralService {
            tree_source,
            investment_source,
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tree_source(&self) -> &T {
        &self.tree_source
    }

    pub fn investment_source(&self) -> &I {
        &self.investment_source
    }

    /// All configured levels of `root`, empty levels included.
    pub async fn levels(&self, root: &str) -> Result<Vec<ReferralLevelEntry>, ReferralError> {
        let tree = self.tree_source.fetch_tree(root).await?;
        Ok(aggregate_levels(&tree, self.config.max_levels))
    }

    pub async fn team_totals(&self, root: &str) -> Result<TeamTotals, ReferralError> {
        let levels = self.levels(root).await?;
        Ok(TeamTotals::from_levels(&levels))
    }

    pub async fn level_page(
        &self,
        root: &str,
        active_only: bool,
        page: usize,
    ) -> Result<LevelPage, ReferralError> {
        let levels = self.levels(root).await?;
        Ok(build_level_view(
            &levels,
            LevelViewOptions {
                active_only,
                page_size: self.config.page_size,
                page,
            },
        ))
    }

    pub async fn level_details(
        &self,
        root: &str,
        level: u32,
    ) -> Result<Vec<LevelUserDetail>, ReferralError> {
        drill_down_level(
            &self.tree_source,
            &self.investment_source,
            root,
            level,
            self.config.max_levels,
            self.config.lookup_timeout(),
        )
        .await
    }
}

impl<T: ReferralTreeSource, I: InvestmentSource>
    ReferralService<CachedTreeSource<T>, CachedInvestmentSource<I>>
{
    /// Same as [`ReferralService::new`] with both sources behind caches using the
    /// configured TTLs.
    pub fn cached(
        tree_source: T,
        investment_source: I,
        config: Config,
    ) -> Result<Self, ReferralError> {
        let tree_source = CachedTreeSource::new(tree_source, config.tree_cache_ttl());
        let investment_source =
            CachedInvestmentSource::new(investment_source, config.default_cache_ttl());
        Self::new(tree_source, investment_source, config)
    }
}
