use std::time::Duration;

// General endpoints (user info, investments) are cached for one minute.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60);

// Referral tree and team statistics change slowly; they are cached for five minutes.
pub const TREE_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

// Upper bound on a single per-user lookup during a level drill-down.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(15);
