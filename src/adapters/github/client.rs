//! Implements Authenticator and RepoCatalog using the GitHub REST API.
//!
//! A successful sign-in keeps the token as the session token and persists it
//! through the JSON token store for the next launch.

use crate::adapters::github::mapper::{self, LicenseEnvelope, RepoDto, UserDto};
use crate::adapters::persistence::JsonTokenStore;
use crate::domain::{DomainError, ErrorKind, License, Repo, RequestResult, Token};
use crate::ports::{Authenticator, RepoCatalog, TokenStore};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const REPOS_PATH: &str = "/user/repos?sort=updated&per_page=100";

/// GitHub API adapter. Shares one HTTP client for sign-in and listing.
pub struct GithubClient {
    http: Client,
    api_url: String,
    store: Arc<JsonTokenStore>,
    /// Token of the current session; set by a successful sign-in.
    session: RwLock<Option<Token>>,
}

impl GithubClient {
    /// # Arguments
    /// * `api_url` - API base without trailing slash (e.g. "https://api.github.com")
    /// * `timeout` - Per-request timeout; expiry is reported as ServerNotResponding
    /// * `store` - Where a successfully used token is saved
    pub fn new(
        api_url: impl Into<String>,
        timeout: Duration,
        store: Arc<JsonTokenStore>,
    ) -> Result<Self, DomainError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("repo-viewer/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DomainError::Http(format!("build client: {}", e)))?;
        Ok(Self {
            http,
            api_url: api_url.into(),
            store,
            session: RwLock::new(None),
        })
    }

    /// GET `path` with the given token and decode the body.
    ///
    /// With `allow_missing`, a 404 yields `Success(None)` instead of an error.
    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &Token,
        allow_missing: bool,
    ) -> RequestResult<Option<T>> {
        let url = format!("{}{}", self.api_url, path);
        debug!(url = %url, "GitHub request");

        let response = match self
            .http
            .get(&url)
            .header(AUTHORIZATION, format!("Bearer {}", token.as_str()))
            .header(ACCEPT, GITHUB_ACCEPT)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!(url = %url, error = %e, "GitHub request failed");
                return mapper::classify_transport(e);
            }
        };

        let status = response.status();
        if allow_missing && status == StatusCode::NOT_FOUND {
            return RequestResult::Success(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, url = %url, "GitHub API returned error");
            return mapper::classify_status(status, &body);
        }

        match response.json::<T>().await {
            Ok(value) => RequestResult::Success(Some(value)),
            Err(e) => {
                warn!(url = %url, error = %e, "failed to decode GitHub response");
                mapper::classify_transport(e)
            }
        }
    }

    /// Drop a rejected token from disk so the next launch prompts instead of retrying it.
    /// A different saved token is left alone.
    async fn forget_if_stored(&self, rejected: &Token) {
        if self.store.get().await.as_ref() != Some(rejected) {
            return;
        }
        match self.store.clear().await {
            Ok(()) => info!("stored token rejected; removed"),
            Err(e) => warn!(error = %e, "could not remove rejected token"),
        }
    }

    async fn session_token(&self) -> RequestResult<Token> {
        match self.session.read().await.clone() {
            Some(token) => RequestResult::Success(token),
            None => RequestResult::error_with_message(ErrorKind::Unauthorized, "Not signed in"),
        }
    }
}

#[async_trait]
impl Authenticator for GithubClient {
    async fn sign_in(&self, token: &Token) -> RequestResult<()> {
        let user = match self.fetch::<UserDto>("/user", token, false).await {
            RequestResult::Success(user) => user,
            RequestResult::Error {
                kind: ErrorKind::Unauthorized,
                message,
                cause,
            } => {
                self.forget_if_stored(token).await;
                return RequestResult::Error {
                    kind: ErrorKind::Unauthorized,
                    message,
                    cause,
                };
            }
            error => return error.map(|_| ()),
        };
        info!(login = ?user.map(|u| u.login), "GitHub sign-in succeeded");

        *self.session.write().await = Some(token.clone());
        if let Err(e) = self.store.save(token).await {
            warn!(error = %e, "could not persist token; next launch will ask again");
        }
        RequestResult::Success(())
    }
}

#[async_trait]
impl RepoCatalog for GithubClient {
    async fn list_repos(&self) -> RequestResult<Vec<Repo>> {
        let token = match self.session_token().await {
            RequestResult::Success(token) => token,
            error => return error.map(|_| Vec::new()),
        };
        self.fetch::<Vec<RepoDto>>(REPOS_PATH, &token, false)
            .await
            .map(|repos| {
                repos
                    .unwrap_or_default()
                    .into_iter()
                    .map(mapper::repo_to_domain)
                    .collect()
            })
    }

    async fn license(&self, owner: &str, repo: &str) -> RequestResult<Option<License>> {
        let token = match self.session_token().await {
            RequestResult::Success(token) => token,
            error => return error.map(|_| None),
        };
        let path = format!("/repos/{}/{}/license", owner, repo);
        self.fetch::<LicenseEnvelope>(&path, &token, true)
            .await
            .map(|envelope| envelope.and_then(|e| e.license))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::TokenStore;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn client(dir: &tempfile::TempDir) -> GithubClient {
        let store = Arc::new(JsonTokenStore::new(dir.path().join("token.json")));
        GithubClient::new("http://127.0.0.1:9", Duration::from_secs(1), store).unwrap()
    }

    fn client_at(url: &str, timeout: Duration, store: Arc<JsonTokenStore>) -> GithubClient {
        GithubClient::new(url, timeout, store).unwrap()
    }

    /// Answer a single connection with a canned JSON response.
    async fn serve(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\n\
                 Content-Type: application/json\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });
        url
    }

    fn kind_of<T>(result: &RequestResult<T>) -> Option<ErrorKind> {
        match result {
            RequestResult::Error { kind, .. } => Some(*kind),
            RequestResult::Success(_) => None,
        }
    }

    #[tokio::test]
    async fn refused_connection_is_connection_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonTokenStore::new(dir.path().join("token.json")));
        let gh = client_at("http://127.0.0.1:9", Duration::from_secs(2), store.clone());

        let result = gh.sign_in(&Token::new("x")).await;

        assert_eq!(kind_of(&result), Some(ErrorKind::ConnectionError));
        assert!(store.get().await.is_none());
    }

    #[tokio::test]
    async fn silent_server_is_not_responding() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let held = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(socket);
        });
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonTokenStore::new(dir.path().join("token.json")));
        let gh = client_at(&url, Duration::from_millis(200), store.clone());

        let result = gh.sign_in(&Token::new("x")).await;

        assert_eq!(kind_of(&result), Some(ErrorKind::ServerNotResponding));
        assert!(store.get().await.is_none());
        held.abort();
    }

    #[tokio::test]
    async fn successful_sign_in_saves_token_and_opens_session() {
        let url = serve("200 OK", r#"{"login":"x"}"#).await;
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonTokenStore::new(dir.path().join("token.json")));
        let gh = client_at(&url, Duration::from_secs(2), store.clone());

        let result = gh.sign_in(&Token::new("ghp_ok")).await;

        assert!(matches!(result, RequestResult::Success(())));
        assert_eq!(store.get().await, Some(Token::new("ghp_ok")));
        assert_eq!(*gh.session.read().await, Some(Token::new("ghp_ok")));
    }

    #[tokio::test]
    async fn rejected_stored_token_is_removed() {
        let url = serve("401 Unauthorized", r#"{"message":"Bad credentials"}"#).await;
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonTokenStore::new(dir.path().join("token.json")));
        store.save(&Token::new("ghp_stale")).await.unwrap();
        let gh = client_at(&url, Duration::from_secs(2), store.clone());

        let result = gh.sign_in(&Token::new("ghp_stale")).await;

        match result {
            RequestResult::Error { kind, message, .. } => {
                assert_eq!(kind, ErrorKind::Unauthorized);
                assert_eq!(message.as_deref(), Some("Bad credentials"));
            }
            RequestResult::Success(_) => panic!("expected Unauthorized"),
        }
        assert!(store.get().await.is_none());
        assert!(gh.session.read().await.is_none());
    }

    #[tokio::test]
    async fn rejected_typed_token_keeps_other_saved_token() {
        let url = serve("401 Unauthorized", r#"{"message":"Bad credentials"}"#).await;
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonTokenStore::new(dir.path().join("token.json")));
        store.save(&Token::new("ghp_saved")).await.unwrap();
        let gh = client_at(&url, Duration::from_secs(2), store.clone());

        let result = gh.sign_in(&Token::new("ghp_typo")).await;

        assert_eq!(kind_of(&result), Some(ErrorKind::Unauthorized));
        assert_eq!(store.get().await, Some(Token::new("ghp_saved")));
    }

    #[tokio::test]
    async fn listing_without_session_is_unauthorized_with_message() {
        let dir = tempfile::tempdir().unwrap();
        let gh = client(&dir);

        match gh.list_repos().await {
            RequestResult::Error { kind, message, .. } => {
                assert_eq!(kind, ErrorKind::Unauthorized);
                assert_eq!(message.as_deref(), Some("Not signed in"));
            }
            RequestResult::Success(_) => panic!("expected Unauthorized"),
        }
    }

    #[tokio::test]
    async fn license_without_session_is_unauthorized() {
        let dir = tempfile::tempdir().unwrap();
        let gh = client(&dir);

        let result = gh.license("alice", "crate").await;
        assert!(matches!(
            result,
            RequestResult::Error {
                kind: ErrorKind::Unauthorized,
                message: Some(_),
                ..
            }
        ));
    }
}
