use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookr::cli::{run_command, Cli};
use bookr::config::Config;
use bookr::session::TokenStore;
use bookr::{ApiClient, AppContext};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration; CLI flags win over the file
    let mut config = Config::load(&cli.config)?;
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    // Initialize logging
    let log_level = cli
        .log_level
        .as_ref()
        .unwrap_or(&config.logging.level)
        .clone();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let store = TokenStore::new(&config.auth.data_dir, &config.auth.token_file);
    let (mut api, expired_rx) = ApiClient::new(&config.api, store)?;
    if let Some(token) = &cli.token {
        api = api.with_token(token.clone());
    }

    let mut ctx = AppContext::new(config, api, expired_rx, cli.token.is_some());
    let result = run_command(&ctx, &cli).await;

    // The HTTP layer only signals expiry; reacting to it happens here, once.
    if ctx.expired_rx.try_recv().is_ok() {
        ctx.session.lock().expired();
        eprintln!("Session expired. Run 'bookr login' to sign in again.");
    }

    result
}
