use std::{
    collections::HashMap,
    hash::Hash,
    sync::{Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use async_trait::async_trait;
use mlm::{
    error::SourceError,
    ttl::{DEFAULT_CACHE_TTL, TREE_CACHE_TTL},
};
use tokio::time::Instant;
use tracing::debug;

use crate::{
    source::{InvestmentSource, ReferralTreeSource},
    tree::{InvestmentRecord, ReferralTree, ReferredUser},
};

/// Map whose entries expire `ttl` after insertion. Expired entries are dropped on read and
/// swept on every insert.
struct TtlMap<K, V> {
    ttl: Duration,
    entries: Mutex<HashMap<K, (Instant, V)>>,
}

impl<K: Eq + Hash, V: Clone> TtlMap<K, V> {
    fn new(ttl: Duration) -> Self {
        TtlMap {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn get(&self, key: &K) -> Option<V> {
        let mut entries = self.lock();
        if let Some((stored_at, value)) = entries.get(key) {
            if stored_at.elapsed() < self.ttl {
                return Some(value.clone());
            }
        }
        entries.remove(key);
        None
    }

    fn insert(&self, key: K, value: V) {
        let mut entries = self.lock();
        entries.retain(|_, (stored_at, _)| stored_at.elapsed() < self.ttl);
        entries.insert(key, (Instant::now(), value));
    }

    fn len(&self) -> usize {
        self.lock().len()
    }

    fn retain(&self, mut keep: impl FnMut(&K) -> bool) {
        self.lock().retain(|key, _| keep(key));
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<K, (Instant, V)>> {
        // entries are plain values, a panic mid-insert leaves nothing half-written
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn cache_key(address: &str) -> String {
    address.trim().to_ascii_lowercase()
}

/// Time-boxed cache in front of a tree source, keyed by lower-cased root address and
/// level. Failed fetches are not cached.
pub struct CachedTreeSource<S> {
    inner: S,
    trees: TtlMap<String, ReferralTree>,
    levels: TtlMap<(String, u32), Vec<ReferredUser>>,
}

impl<S: ReferralTreeSource> CachedTreeSource<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        CachedTreeSource {
            inner,
            trees: TtlMap::new(ttl),
            levels: TtlMap::new(ttl),
        }
    }

    pub fn with_default_ttl(inner: S) -> Self {
        Self::new(inner, TREE_CACHE_TTL)
    }

    pub fn ttl(&self) -> Duration {
        self.trees.ttl
    }

    /// Number of cached trees and levels, expired ones not yet swept included.
    pub fn entry_count(&self) -> usize {
        self.trees.len() + self.levels.len()
    }

    /// Drops every cached entry of `root`.
    pub fn invalidate(&self, root: &str) {
        let root = cache_key(root);
        self.trees.retain(|key| *key != root);
        self.levels.retain(|(key, _)| *key != root);
    }
}

#[async_trait]
impl<S: ReferralTreeSource> ReferralTreeSource for CachedTreeSource<S> {
    async fn fetch_tree(&self, root: &str) -> Result<ReferralTree, SourceError> {
        let key = cache_key(root);
        if let Some(tree) = self.trees.get(&key) {
            debug!(root = %key, "Referral: Cached tree: hit");
            return Ok(tree);
        }

        debug!(root = %key, "Referral: Cached tree: miss");
        let tree = self.inner.fetch_tree(root).await?;
        self.trees.insert(key, tree.clone());
        Ok(tree)
    }

    async fn fetch_level(&self, root: &str, level: u32) -> Result<Vec<ReferredUser>, SourceError> {
        let key = (cache_key(root), level);
        if let Some(users) = self.levels.get(&key) {
            debug!(root = %key.0, level, "Referral: Cached level: hit");
            return Ok(users);
        }
        if let Some(tree) = self.trees.get(&key.0) {
            debug!(root = %key.0, level, "Referral: Cached level: served from cached tree");
            return Ok(tree.users_at(level).to_vec());
        }

        debug!(root = %key.0, level, "Referral: Cached level: miss");
        let users = self.inner.fetch_level(root, level).await?;
        self.levels.insert(key, users.clone());
        Ok(users)
    }
}

/// Time-boxed cache in front of an investment source, keyed by lower-cased user address.
pub struct CachedInvestmentSource<S> {
    inner: S,
    investments: TtlMap<String, Vec<InvestmentRecord>>,
}

impl<S: InvestmentSource> CachedInvestmentSource<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        CachedInvestmentSource {
            inner,
            investments: TtlMap::new(ttl),
        }
    }

    pub fn with_default_ttl(inner: S) -> Self {
        Self::new(inner, DEFAULT_CACHE_TTL)
    }

    pub fn ttl(&self) -> Duration {
        self.investments.ttl
    }

    pub fn entry_count(&self) -> usize {
        self.investments.len()
    }

    pub fn invalidate(&self, user: &str) {
        let user = cache_key(user);
        self.investments.retain(|key| *key != user);
    }
}

#[async_trait]
impl<S: InvestmentSource> InvestmentSource for CachedInvestmentSource<S> {
    async fn fetch_investments(&self, user: &str) -> Result<Vec<InvestmentRecord>, SourceError> {
        let key = cache_key(user);
        if let Some(investments) = self.investments.get(&key) {
            debug!(user = %key, "Referral: Cached investments: hit");
            return Ok(investments);
        }

        let investments = self.inner.fetch_investments(user).await?;
        self.investments.insert(key, investments.clone());
        Ok(investments)
    }
}
