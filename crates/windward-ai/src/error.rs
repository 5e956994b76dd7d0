//! AI-layer error type.
//!
//! Only structural corruption during save/load reconstruction is an error
//! here.  Transient action failures are booleans, policy refusals are skips,
//! and invariant violations are warn-and-self-heal — none of those surface
//! as `AiError`.

use thiserror::Error;
use windward_core::UnitId;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("unknown mission tag `{0}`")]
    UnknownMissionTag(String),

    #[error("mission record has no `kind` tag")]
    MissingMissionTag,

    #[error("agent record references unresolvable unit {0}")]
    UnresolvedUnit(UnitId),

    #[error("duplicate agent record for unit {0}")]
    DuplicateAgent(UnitId),

    #[error("malformed record: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub type AiResult<T> = Result<T, AiError>;
