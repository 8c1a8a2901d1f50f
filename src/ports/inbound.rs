//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: UI/CLI drives the application screens.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run the sign-in screen, then the repository list once signed in.
    async fn run(&self) -> Result<(), DomainError>;
}
