use thiserror::Error;
use windward_ai::AiError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("ai state error: {0}")]
    Ai(#[from] AiError),
}

pub type SimResult<T> = Result<T, SimError>;
