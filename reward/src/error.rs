use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RewardError {
    #[error("win rate must be within [0, 1], got {0}")]
    InvalidRate(f64),

    #[error("invalid day boundary offset: {0}")]
    InvalidOffset(String),
}
