use thiserror::Error;

use yams_core::DomainError;

use crate::store::StoreError;

/// Failure of a game transaction step.
///
/// Every variant except `Store` is a deterministic outcome the API reports
/// with its own code.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("player not found")]
    PlayerNotFound,

    #[error("no turns remaining")]
    NoTurnsRemaining,

    /// Conditional-write retries were exhausted.
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("invalid state: {0}")]
    Domain(DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<DomainError> for GameError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NoTurnsRemaining => GameError::NoTurnsRemaining,
            DomainError::NotFound => GameError::PlayerNotFound,
            DomainError::Conflict(msg) => GameError::Conflict(msg),
            other => GameError::Domain(other),
        }
    }
}
