use npc_behavior::BehaviorError;
use npc_core::AgentId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("scheduler configuration error: {0}")]
    Config(String),

    #[error("invalid behavior: {0}")]
    Behavior(#[from] BehaviorError),

    #[error("{0} is already part of the population")]
    DuplicateAgent(AgentId),
}

pub type SimResult<T> = Result<T, SimError>;
