use thiserror::Error;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("behavior configuration error: {0}")]
    Config(String),

    #[error("action #{index}: {reason}")]
    Template {
        index:  usize,
        reason: String,
    },

    #[error("invalid action weights: {0}")]
    Weights(String),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
