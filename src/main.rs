//! Wiring & DI. Entry point: bootstrap adapters, inject into the sign-in flow, run UI.
//! No business logic here; sign-in is delegated to SignInFlow.

use dotenv::dotenv;
use repo_viewer::adapters::github::GithubClient;
use repo_viewer::adapters::locale::Catalog;
use repo_viewer::adapters::persistence::JsonTokenStore;
use repo_viewer::adapters::ui::{ChannelRouter, TuiInputPort};
use repo_viewer::ports::{
    Authenticator, InputPort, MessageProvider, RepoCatalog, Router, TokenStore,
};
use repo_viewer::shared::config::AppConfig;
use repo_viewer::usecases::SignInFlow;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!("no .env found"),
    }

    repo_viewer::adapters::ui::init_ui();

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "invalid configuration; using defaults");
        AppConfig::default()
    });
    let api_url = cfg.api_url_or_default();
    let token_path = cfg.token_path_or_default();
    let locale = cfg.locale_or_default();
    info!(
        api_url = %api_url,
        token_path = %token_path.display(),
        ?locale,
        "configuration loaded"
    );

    // --- Adapters ---
    let store = Arc::new(JsonTokenStore::new(&token_path));
    let github = Arc::new(
        GithubClient::new(api_url, cfg.request_timeout_or_default(), Arc::clone(&store))
            .map_err(|e| anyhow::anyhow!("{}", e))?,
    );
    let catalog = Catalog::new(locale);
    let (router, navigation) = ChannelRouter::new();

    // --- Sign-in flow (restores a saved session immediately) ---
    let flow = SignInFlow::start(
        Arc::clone(&store) as Arc<dyn TokenStore>,
        Arc::clone(&github) as Arc<dyn Authenticator>,
        Arc::new(router) as Arc<dyn Router>,
        Arc::new(catalog) as Arc<dyn MessageProvider>,
        cfg.action_buffer_or_default(),
    );

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(
        flow,
        navigation,
        github as Arc<dyn RepoCatalog>,
        catalog,
    ));

    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
