//! Sign-in screen controller. Restores a saved session or exchanges the entered token.
//!
//! State is replay-latest (`watch`): an observer attaching late sees the current value only.
//! Actions are one-shot (`mpsc`): each is delivered to exactly one consumer and never replayed.
//! All work runs on a `JoinSet` owned by the flow; dropping the flow aborts it.

use crate::domain::{ErrorKind, FlowError, RequestResult, Token};
use crate::ports::{Authenticator, MessageProvider, Router, TokenStore};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

/// Default action buffer. Matches a typical UI event channel.
pub const DEFAULT_ACTION_BUFFER: usize = 64;

/// What the sign-in screen currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    /// Ready for input.
    Idle,
    /// Session restore or sign-in in progress.
    Loading,
    /// Token rejected or missing; `reason` stays on screen until the next attempt.
    InvalidInput { reason: String },
}

/// Transient UI event. Consumed at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ShowError { message: String },
    /// Never emitted by the flow: success navigates through [`Router`] directly.
    RouteToMain,
}

/// Shared part of the flow, referenced by every scoped task.
struct FlowCore {
    token_store: Arc<dyn TokenStore>,
    authenticator: Arc<dyn Authenticator>,
    router: Arc<dyn Router>,
    messages: Arc<dyn MessageProvider>,
    state: watch::Sender<State>,
    token: watch::Sender<String>,
    actions: mpsc::Sender<Action>,
}

impl FlowCore {
    fn set_state(&self, next: State) {
        debug!(state = ?next, "sign-in state");
        self.state.send_replace(next);
    }

    async fn emit(&self, action: Action) {
        // Receiver only goes away together with the flow.
        if self.actions.send(action).await.is_err() {
            debug!("action dropped: flow closed");
        }
    }

    async fn restore_session(&self) -> Result<(), FlowError> {
        let Some(token) = self.token_store.get().await else {
            info!("no stored token");
            self.set_state(State::Idle);
            return Ok(());
        };
        info!("stored token found; signing in");
        let result = self.authenticator.sign_in(&token).await;
        self.handle_result(result).await
    }

    async fn submit(&self) -> Result<(), FlowError> {
        self.set_state(State::Loading);
        let input = self.token.borrow().clone();
        if input.is_empty() {
            self.set_state(State::InvalidInput {
                reason: self.messages.enter_token(),
            });
            return Ok(());
        }
        let result = self.authenticator.sign_in(&Token::new(input)).await;
        self.handle_result(result).await
    }

    async fn handle_result(&self, result: RequestResult<()>) -> Result<(), FlowError> {
        let (kind, message, cause) = match result {
            RequestResult::Success(()) => {
                info!("signed in");
                self.router.navigate_to_main();
                return Ok(());
            }
            RequestResult::Error {
                kind,
                message,
                cause,
            } => (kind, message, cause),
        };

        match kind {
            ErrorKind::ServerNotResponding => {
                warn!("sign-in failed: server not responding");
                self.set_state(State::Idle);
                self.emit(Action::ShowError {
                    message: self.messages.server_not_responding(),
                })
                .await;
            }
            ErrorKind::ConnectionError => {
                warn!("sign-in failed: connection error");
                self.set_state(State::Idle);
                self.emit(Action::ShowError {
                    message: self.messages.connection_error(),
                })
                .await;
            }
            ErrorKind::Unauthorized => {
                let Some(reason) = message else {
                    error!("authenticator returned Unauthorized without a message");
                    return Err(FlowError::UnauthorizedWithoutReason);
                };
                info!(reason = %reason, "token rejected");
                self.set_state(State::InvalidInput { reason });
            }
            ErrorKind::Other => {
                warn!(message = ?message, cause = ?cause, "sign-in failed");
                // The cause is appended as its Display text (a message, not a type name).
                let message = message.unwrap_or_else(|| match cause {
                    Some(cause) => format!("{} {}", self.messages.undescribed_error(), cause),
                    None => self.messages.undescribed_error(),
                });
                self.set_state(State::Idle);
                self.emit(Action::ShowError { message }).await;
            }
        }
        Ok(())
    }
}

/// Sign-in flow. One per screen instance.
///
/// Overlapping [`submit`](Self::submit) calls are not deduplicated: each one sets
/// `Loading` and races to completion independently.
pub struct SignInFlow {
    core: Arc<FlowCore>,
    scope: Mutex<JoinSet<Result<(), FlowError>>>,
    actions: tokio::sync::Mutex<mpsc::Receiver<Action>>,
}

impl SignInFlow {
    /// Build the flow and launch session restore on its scope.
    ///
    /// Must be called from within a Tokio runtime. State starts as `Loading`.
    pub fn start(
        token_store: Arc<dyn TokenStore>,
        authenticator: Arc<dyn Authenticator>,
        router: Arc<dyn Router>,
        messages: Arc<dyn MessageProvider>,
        action_buffer: usize,
    ) -> Self {
        let (state, _) = watch::channel(State::Loading);
        let (token, _) = watch::channel(String::new());
        let (actions_tx, actions_rx) = mpsc::channel(action_buffer.max(1));

        let flow = Self {
            core: Arc::new(FlowCore {
                token_store,
                authenticator,
                router,
                messages,
                state,
                token,
                actions: actions_tx,
            }),
            scope: Mutex::new(JoinSet::new()),
            actions: tokio::sync::Mutex::new(actions_rx),
        };

        let core = Arc::clone(&flow.core);
        flow.lock_scope()
            .spawn(async move { core.restore_session().await });
        flow
    }

    /// Sign in with the current token input. Returns immediately; work runs on the flow scope.
    pub fn submit(&self) {
        let core = Arc::clone(&self.core);
        self.lock_scope().spawn(async move { core.submit().await });
    }

    /// Current state snapshot.
    pub fn state(&self) -> State {
        self.core.state.borrow().clone()
    }

    /// Observe state changes. The receiver starts at the current value.
    pub fn subscribe_state(&self) -> watch::Receiver<State> {
        self.core.state.subscribe()
    }

    /// Wait for the next action. Each action goes to exactly one caller.
    pub async fn next_action(&self) -> Option<Action> {
        self.actions.lock().await.recv().await
    }

    /// Take a queued action without waiting.
    pub fn try_next_action(&self) -> Option<Action> {
        self.actions.try_lock().ok()?.try_recv().ok()
    }

    /// Current token input.
    pub fn token(&self) -> String {
        self.core.token.borrow().clone()
    }

    /// Update the token input (view -> flow).
    pub fn set_token(&self, value: impl Into<String>) {
        self.core.token.send_replace(value.into());
    }

    /// Observe the token input (flow -> view).
    pub fn subscribe_token(&self) -> watch::Receiver<String> {
        self.core.token.subscribe()
    }

    /// Wait until all in-flight work has finished.
    ///
    /// Returns the first fault raised by any task since the last call.
    ///
    /// Never resolves while a task is blocked on a full action buffer: drain actions
    /// (or size the buffer for the number of overlapping submits) before awaiting this.
    pub async fn settle(&self) -> Result<(), FlowError> {
        let mut first_err = None;
        // Tasks stay in the shared set while polled, so dropping this future cancels nothing.
        while let Some(joined) =
            std::future::poll_fn(|cx| self.lock_scope().poll_join_next(cx)).await
        {
            let outcome = match joined {
                Ok(outcome) => outcome,
                Err(e) if e.is_cancelled() => Ok(()),
                Err(e) => Err(FlowError::TaskPanicked(e.to_string())),
            };
            if let Err(e) = outcome {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    fn lock_scope(&self) -> std::sync::MutexGuard<'_, JoinSet<Result<(), FlowError>>> {
        self.scope.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
