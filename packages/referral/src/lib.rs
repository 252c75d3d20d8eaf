mod cache;
mod drill_down;
mod error;
mod fallback;
mod levels;
mod service;
mod source;
mod tree;
mod view;

pub use cache::{CachedInvestmentSource, CachedTreeSource};
pub use drill_down::{drill_down_level, LevelUserDetail};
pub use error::ReferralError;
pub use fallback::FallbackTreeSource;
pub use levels::{aggregate_levels, ReferralLevelEntry, TeamTotals};
pub use mlm::config::DEFAULT_MAX_LEVELS;
pub use service::ReferralService;
pub use source::{InvestmentSource, ReferralTreeSource};
pub use tree::{InvestmentRecord, ReferralTree, ReferredUser, TreeResponse};
pub use view::{build_level_view, LevelPage, LevelViewOptions};
