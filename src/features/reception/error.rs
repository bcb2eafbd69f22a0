use thiserror::Error;

use crate::core::error::AppError;

/// Queue state-contract violations. None of these are retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReceptionError {
    /// Referenced ticket or counter does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// Operation attempted against an entity in the wrong state
    #[error("{0}")]
    InvalidState(String),

    /// No ticket is waiting. Expected, not a fault.
    #[error("No tickets waiting")]
    EmptyQueue,
}

impl ReceptionError {
    pub fn ticket_not_found(number: &str) -> Self {
        ReceptionError::NotFound(format!("Ticket '{}'", number))
    }

    pub fn counter_not_found(id: u32) -> Self {
        ReceptionError::NotFound(format!("Counter {}", id))
    }
}

impl From<ReceptionError> for AppError {
    fn from(err: ReceptionError) -> Self {
        match err {
            ReceptionError::NotFound(_) | ReceptionError::EmptyQueue => {
                AppError::NotFound(err.to_string())
            }
            ReceptionError::InvalidState(msg) => AppError::Conflict(msg),
        }
    }
}

pub type ReceptionResult<T> = std::result::Result<T, ReceptionError>;
