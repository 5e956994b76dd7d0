//! World-layer error type.

use thiserror::Error;
use windward_core::UnitId;

#[derive(Debug, Error)]
pub enum WorldError {
    #[error("unit {0} not found")]
    UnitNotFound(UnitId),

    #[error("unit {0} is disposed")]
    UnitDisposed(UnitId),
}

pub type WorldResult<T> = Result<T, WorldError>;
