//! Implements InputPort. Inquire-based sign-in screen and repository list.
//!
//! Renders SignInFlow state (spinner while loading, inline reason on invalid input),
//! prints one-shot error actions, and switches to the repository list once routed.

use super::argb_to_color;
use crate::adapters::locale::Catalog;
use crate::domain::{DomainError, Repo, RequestResult};
use crate::ports::{Destination, InputPort, RepoCatalog};
use crate::usecases::{Action, SignInFlow, State};
use async_trait::async_trait;
use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use indicatif::{ProgressBar, ProgressStyle};
use inquire::error::InquireError;
use inquire::ui::{Color as PromptColor, RenderConfig, Styled};
use inquire::{Password, PasswordDisplayMode, Select};
use std::io::{Write, stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, info};

const ERROR_RED: Color = Color::Rgb {
    r: 0xcf,
    g: 0x22,
    b: 0x2e,
};
const MUTED: Color = Color::Rgb {
    r: 0x8c,
    g: 0x95,
    b: 0x9f,
};

/// Prompt styling shared by every inquire prompt.
pub fn apply_theme() {
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("›").with_fg(PromptColor::LightCyan))
        .with_answered_prompt_prefix(Styled::new("✓").with_fg(PromptColor::LightGreen));
    inquire::set_global_render_config(config);
}

/// What the screen loop does after in-flight work settles.
enum Step {
    Prompt,
    Main,
}

/// TUI adapter. Drives the sign-in flow from terminal prompts.
pub struct TuiInputPort {
    flow: SignInFlow,
    navigation: Mutex<mpsc::UnboundedReceiver<Destination>>,
    repos: Arc<dyn RepoCatalog>,
    catalog: Catalog,
}

impl TuiInputPort {
    pub fn new(
        flow: SignInFlow,
        navigation: mpsc::UnboundedReceiver<Destination>,
        repos: Arc<dyn RepoCatalog>,
        catalog: Catalog,
    ) -> Self {
        Self {
            flow,
            navigation: Mutex::new(navigation),
            repos,
            catalog,
        }
    }

    /// Show a spinner until the flow's in-flight work completes, then decide the next step.
    async fn settle(&self) -> Result<Step, DomainError> {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(self.catalog.signing_in());
        spinner.enable_steady_tick(Duration::from_millis(100));

        let settled = self.flow.settle().await;
        spinner.finish_and_clear();
        settled?;

        if let Ok(Destination::Main) = self.navigation.lock().await.try_recv() {
            return Ok(Step::Main);
        }
        Ok(Step::Prompt)
    }

    /// Print every queued one-shot action.
    fn drain_actions(&self) {
        while let Some(action) = self.flow.try_next_action() {
            match action {
                Action::ShowError { message } => print_line(&message, ERROR_RED),
                Action::RouteToMain => {
                    debug!("RouteToMain action ignored; router handles navigation")
                }
            }
        }
    }

    fn render_state(&self) {
        if let State::InvalidInput { reason } = self.flow.state() {
            print_line(&reason, ERROR_RED);
        }
    }

    /// Ask for the token. `None` when the user cancels the prompt.
    async fn prompt_token(&self) -> Result<Option<String>, DomainError> {
        let label = self.catalog.token_prompt();
        let answer = tokio::task::spawn_blocking(move || {
            Password::new(&label)
                .without_confirmation()
                .with_display_mode(PasswordDisplayMode::Masked)
                .prompt()
        })
        .await
        .map_err(|e| DomainError::Ui(e.to_string()))?;
        cancelled_as_none(answer)
    }

    async fn show_main(&self) -> Result<(), DomainError> {
        let repos = match self.repos.list_repos().await {
            RequestResult::Success(repos) => repos,
            RequestResult::Error { message, .. } => {
                print_line(
                    &message.unwrap_or_else(|| self.catalog.no_repositories()),
                    ERROR_RED,
                );
                return Ok(());
            }
        };
        info!(count = repos.len(), "repositories loaded");
        if repos.is_empty() {
            print_line(&self.catalog.no_repositories(), MUTED);
            return Ok(());
        }

        print_line(&self.catalog.repositories(), MUTED);
        for repo in &repos {
            print_repo(repo);
        }

        loop {
            let options: Vec<String> = repos.iter().map(repo_label).collect();
            let title = self.catalog.repositories();
            let picked = tokio::task::spawn_blocking(move || Select::new(&title, options).prompt())
                .await
                .map_err(|e| DomainError::Ui(e.to_string()))?;
            let Some(label) = cancelled_as_none(picked)? else {
                return Ok(());
            };
            let Some(repo) = repos.iter().find(|r| repo_label(r) == label) else {
                continue;
            };
            match self.repos.license(&repo.owner, &repo.name).await {
                RequestResult::Success(license) => {
                    let name = license
                        .and_then(|l| l.name)
                        .unwrap_or_else(|| self.catalog.no_license());
                    print_line(&format!("{}: {}", repo_label(repo), name), MUTED);
                }
                RequestResult::Error { message, cause, .. } => {
                    let text = message
                        .or_else(|| cause.map(|c| c.to_string()))
                        .unwrap_or_default();
                    print_line(&text, ERROR_RED);
                }
            }
        }
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            if let Step::Main = self.settle().await? {
                return self.show_main().await;
            }
            self.drain_actions();
            self.render_state();

            let Some(token) = self.prompt_token().await? else {
                info!("sign-in cancelled");
                return Ok(());
            };
            self.flow.set_token(token.trim());
            self.flow.submit();
        }
    }
}

fn cancelled_as_none<T>(answer: Result<T, InquireError>) -> Result<Option<T>, DomainError> {
    match answer {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(DomainError::Ui(e.to_string())),
    }
}

fn repo_label(repo: &Repo) -> String {
    format!("{}/{}", repo.owner, repo.name)
}

fn print_repo(repo: &Repo) {
    let mut out = stdout();
    let _ = out.execute(Print(format!("  {} ", repo_label(repo))));
    if !repo.language.is_empty() {
        let color = repo.color.map(argb_to_color).unwrap_or(MUTED);
        let _ = out.execute(SetForegroundColor(color));
        let _ = out.execute(Print(format!("[{}]", repo.language)));
        let _ = out.execute(ResetColor);
    }
    if !repo.description.is_empty() {
        let _ = out.execute(Print(format!(" {}", repo.description)));
    }
    let _ = out.execute(Print("\r\n"));
    let _ = out.flush();
}

fn print_line(text: &str, color: Color) {
    let mut out = stdout();
    let _ = out.execute(SetForegroundColor(color));
    let _ = out.execute(Print(text));
    let _ = out.execute(Print("\r\n"));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb_drops_alpha() {
        assert_eq!(
            argb_to_color(0xFFDEA584),
            Color::Rgb {
                r: 0xDE,
                g: 0xA5,
                b: 0x84
            }
        );
    }

    #[test]
    fn cancelled_prompt_is_none() {
        let answer: Result<String, InquireError> = Err(InquireError::OperationCanceled);
        assert!(matches!(cancelled_as_none(answer), Ok(None)));

        let answer: Result<String, InquireError> = Ok("tok".into());
        assert!(matches!(cancelled_as_none(answer), Ok(Some(ref t)) if t == "tok"));
    }

    #[test]
    fn repo_label_is_owner_slash_name() {
        let repo = Repo {
            name: "crate".into(),
            owner: "alice".into(),
            description: String::new(),
            language: String::new(),
            color: None,
        };
        assert_eq!(repo_label(&repo), "alice/crate");
    }
}
