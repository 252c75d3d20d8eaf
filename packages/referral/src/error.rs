use mlm::error::{ConfigError, SourceError};

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ReferralError {
    #[error("level {level} is outside of 1..={max_levels}")]
    InvalidLevel { level: u32, max_levels: u32 },
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
