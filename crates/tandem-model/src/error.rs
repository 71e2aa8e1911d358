use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("pool size {size} is below the minimum of {min} concurrent slots")]
    PoolTooSmall { size: usize, min: usize },
    #[error("secondary timeout must be greater than zero")]
    ZeroTimeout,
}
