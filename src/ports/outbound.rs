//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{License, Repo, RequestResult, Token};

/// Locally saved credential from a previous session.
#[async_trait::async_trait]
pub trait TokenStore: Send + Sync {
    /// Returns the stored token, or None when nothing usable is saved.
    async fn get(&self) -> Option<Token>;
}

/// Exchanges a token for an authenticated session.
#[async_trait::async_trait]
pub trait Authenticator: Send + Sync {
    /// Errors are classified, never raised. An `Unauthorized` error must carry a message.
    async fn sign_in(&self, token: &Token) -> RequestResult<()>;
}

/// Repositories visible to the signed-in user.
#[async_trait::async_trait]
pub trait RepoCatalog: Send + Sync {
    async fn list_repos(&self) -> RequestResult<Vec<Repo>>;

    /// License of `owner/repo`; `Success(None)` when the repository has none.
    async fn license(&self, owner: &str, repo: &str) -> RequestResult<Option<License>>;
}

/// Localized user-facing strings for the sign-in screen.
pub trait MessageProvider: Send + Sync {
    fn enter_token(&self) -> String;
    fn server_not_responding(&self) -> String;
    fn connection_error(&self) -> String;
    fn undescribed_error(&self) -> String;
}
