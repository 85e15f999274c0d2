use sos_core::SosError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error(transparent)]
    Core(#[from] SosError),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
