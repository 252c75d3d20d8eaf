use std::sync::Arc;

use async_trait::async_trait;
use mlm::error::SourceError;

use crate::tree::{InvestmentRecord, ReferralTree, ReferredUser};

/// Provider of referral trees, typically the REST backend.
#[async_trait]
pub trait ReferralTreeSource: Send + Sync {
    async fn fetch_tree(&self, root: &str) -> Result<ReferralTree, SourceError>;

    /// Users of a single level. Sources with a dedicated endpoint should override this.
    async fn fetch_level(&self, root: &str, level: u32) -> Result<Vec<ReferredUser>, SourceError> {
        let tree = self.fetch_tree(root).await?;
        Ok(tree.users_at(level).to_vec())
    }
}

/// Provider of a single user's investment records.
#[async_trait]
pub trait InvestmentSource: Send + Sync {
    async fn fetch_investments(&self, user: &str) -> Result<Vec<InvestmentRecord>, SourceError>;
}

#[async_trait]
impl<T: ReferralTreeSource + ?Sized> ReferralTreeSource for Arc<T> {
    async fn fetch_tree(&self, root: &str) -> Result<ReferralTree, SourceError> {
        (**self).fetch_tree(root).await
    }

    async fn fetch_level(&self, root: &str, level: u32) -> Result<Vec<ReferredUser>, SourceError> {
        (**self).fetch_level(root, level).await
    }
}

#[async_trait]
impl<T: ReferralTreeSource + ?Sized> ReferralTreeSource for Box<T> {
    async fn fetch_tree(&self, root: &str) -> Result<ReferralTree, SourceError> {
        (**self).fetch_tree(root).await
    }

    async fn fetch_level(&self, root: &str, level: u32) -> Result<Vec<ReferredUser>, SourceError> {
        (**self).fetch_level(root, level).await
    }
}

#[async_trait]
impl<T: InvestmentSource + ?Sized> InvestmentSource for Arc<T> {
    async fn fetch_investments(&self, user: &str) -> Result<Vec<InvestmentRecord>, SourceError> {
        (**self).fetch_investments(user).await
    }
}

#[async_trait]
impl<T: InvestmentSource + ?Sized> InvestmentSource for Box<T> {
    async fn fetch_investments(&self, user: &str) -> Result<Vec<InvestmentRecord>, SourceError> {
        (**self).fetch_investments(user).await
    }
}
