/*
 * Responsibility
 * - Read config → build dependencies (verification key, file store) → assemble Router
 * - Apply middleware (auth on protected routes, security headers, HTTP layers)
 * - Start with axum::serve()
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::Router;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::middleware::{self, http::HttpLimits};
use crate::services::{auth::Authenticator, storage::LocalFileStore};
use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(name = "dropgox", version, about = "Bearer-authenticated file transfer backend")]
pub struct Cli {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,
}

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,dropgox=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // stderr can be hidden depending on how the process is launched.
        tracing::error!(?info, "panic");

        // Development: crash the whole process so it is noticed immediately.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();

    // Before clap, so PORT from .env is honored too.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = Config::from_env(cli.port).context("failed to load configuration")?;
    init_panic_hook(!config.app_env.is_production());

    let state = build_state(&config).await?;
    let app = build_router(state, HttpLimits::new(config.max_upload_bytes));

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    tracing::info!(
        "DropGox Backend is running in {:?} mode on {}",
        config.app_env,
        config.addr
    );
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

/// Build process-level services once and inject them into the shared state.
///
/// Fails when the verification key is unusable: the server must not start
/// without one.
pub async fn build_state(config: &Config) -> Result<AppState> {
    let auth = Authenticator::from_config(config).context("failed to load JWT verification key")?;
    tracing::info!(
        family = ?auth.verifier().family(),
        service_id = auth.policy().service_id(),
        "verification key loaded"
    );

    let files = LocalFileStore::open(&config.storage_dir)
        .await
        .with_context(|| {
            format!(
                "failed to create storage directory {}",
                config.storage_dir.display()
            )
        })?;

    Ok(AppState::new(Arc::new(auth), Arc::new(files)))
}

pub fn build_router(state: AppState, limits: HttpLimits) -> Router {
    let router = api::routes(state.clone(), limits).with_state(state);
    let router = middleware::security_headers::apply(router);
    middleware::http::apply(router, limits)
}
