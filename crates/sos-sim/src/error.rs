use sos_behavior::BehaviorError;
use sos_core::SosError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("unit name {0:?} is registered more than once")]
    DuplicateName(String),

    #[error(transparent)]
    Core(#[from] SosError),

    #[error(transparent)]
    Behavior(#[from] BehaviorError),
}

pub type SimResult<T> = Result<T, SimError>;
