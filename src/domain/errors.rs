//! Domain errors. Used by ports, use cases and adapters.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Token storage error: {0}")]
    Storage(String),

    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("UI error: {0}")]
    Ui(String),

    #[error(transparent)]
    Flow(#[from] FlowError),
}

/// Faults that escape the sign-in flow. Everything else is absorbed into state or actions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// The authenticator rejected a token without saying why.
    /// Unauthorized results must always carry a user-facing reason.
    #[error("authenticator returned Unauthorized without a message")]
    UnauthorizedWithoutReason,

    #[error("sign-in task panicked: {0}")]
    TaskPanicked(String),
}
