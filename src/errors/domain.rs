//! Engine-wide error type, transport- and store-agnostic.
//!
//! Handlers return `Result<T, DomainError>`; the transport collaborator
//! decides how to surface each variant. `is_client_fault` splits
//! game-legality violations (malformed or malicious inbound actions,
//! dropped without mutation) from internal integrity and store failures
//! (which propagate and abort the current action).

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Session id does not map to a known user in this room.
    #[error("invalid session: {0}")]
    InvalidSession(String),

    /// An action violated a game-legality rule (wrong turn, card not
    /// in hand, board full, bid not strictly greater, ...).
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// A discard named a card the player does not hold.
    #[error("illegal discard: {0}")]
    IllegalDiscard(String),

    /// Unsupported configuration (player count outside 3..=8, ...).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Inbound message could not be parsed into an action.
    #[error("malformed action: {0}")]
    MalformedAction(String),

    /// Stored state contradicts an invariant (winning card with no
    /// owner, undecodable card code, ...).
    #[error("data integrity: {0}")]
    Integrity(String),

    /// State store failure. Never retried; aborts the current action.
    #[error("store error: {0}")]
    Store(String),
}

impl DomainError {
    pub fn invalid_session(detail: impl Into<String>) -> Self {
        Self::InvalidSession(detail.into())
    }

    pub fn illegal_move(detail: impl Into<String>) -> Self {
        Self::IllegalMove(detail.into())
    }

    pub fn illegal_discard(detail: impl Into<String>) -> Self {
        Self::IllegalDiscard(detail.into())
    }

    pub fn configuration(detail: impl Into<String>) -> Self {
        Self::Configuration(detail.into())
    }

    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedAction(detail.into())
    }

    pub fn integrity(detail: impl Into<String>) -> Self {
        Self::Integrity(detail.into())
    }

    pub fn store(detail: impl Into<String>) -> Self {
        Self::Store(detail.into())
    }

    /// True for violations attributable to the inbound message. The
    /// orchestrator logs these and drops the message; nothing was
    /// mutated. Everything else is an engine or infrastructure fault.
    pub fn is_client_fault(&self) -> bool {
        matches!(
            self,
            Self::InvalidSession(_)
                | Self::IllegalMove(_)
                | Self::IllegalDiscard(_)
                | Self::MalformedAction(_)
        )
    }
}

impl From<redis::RedisError> for DomainError {
    fn from(err: redis::RedisError) -> Self {
        Self::Store(err.to_string())
    }
}
