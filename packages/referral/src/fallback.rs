use async_trait::async_trait;
use mlm::error::SourceError;
use tracing::info;

use crate::{
    source::ReferralTreeSource,
    tree::{ReferralTree, ReferredUser},
};

/// Ranked list of tree sources, e.g. an optimized endpoint followed by the regular one.
/// Sources are tried in order and the first success wins; if all of them fail the last
/// error is returned.
#[derive(Default)]
pub struct FallbackTreeSource {
    strategies: Vec<(String, Box<dyn ReferralTreeSource>)>,
}

impl FallbackTreeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(
        mut self,
        name: impl Into<String>,
        source: impl ReferralTreeSource + 'static,
    ) -> Self {
        self.strategies.push((name.into(), Box::new(source)));
        self
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

#[async_trait]
impl ReferralTreeSource for FallbackTreeSource {
    async fn fetch_tree(&self, root: &str) -> Result<ReferralTree, SourceError> {
        let mut last_error = SourceError::NoSources;
        for (name, source) in &self.strategies {
            match source.fetch_tree(root).await {
                Ok(tree) => return Ok(tree),
                Err(err) => {
                    info!(
                        strategy = %name,
                        error = %err,
                        "Referral: Fetch tree: strategy failed, falling back"
                    );
                    last_error = err;
                }
            }
        }
        Err(last_error)
    }

    async fn fetch_level(&self, root: &str, level: u32) -> Result<Vec<ReferredUser>, SourceError> {
        let mut last_error = SourceError::NoSources;
        for (name, source) in &self.strategies {
            match source.fetch_level(root, level).await {
                Ok(users) => return Ok(users),
                Err(err) => {
                    info!(
                        strategy = %name,
                        level,
                        error = %err,
                        "Referral: Fetch level: strategy failed, falling back"
                    );
                    last_error = err;
                }
            }
        }
        Err(last_error)
    }
}
