use thiserror::Error;

/// Failure taxonomy for the membership core.
///
/// Every service operation returns one of these; the HTTP layer maps each
/// variant to a status code (see server/error.rs). Failures are detected at
/// the point of violation and returned immediately - nothing is retried or
/// swallowed inside the core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Caller-supplied input violates a basic well-formedness rule
    #[error("{0}")]
    Validation(String),

    /// A referenced entity id does not resolve
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A uniqueness or concurrency constraint was violated
    #[error("{0}")]
    Conflict(String),

    /// Referenced entities exist but their relationship violates an invariant
    #[error("{0}")]
    InvalidState(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl CoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }
}
