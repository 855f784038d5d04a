//! Error types for the pool

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("pool exhausted - no free items available")]
    Exhausted,

    #[error("acquire timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("pool is draining - no further items will be handed out")]
    Draining,
}

pub type PoolResult<T> = Result<T, PoolError>;
