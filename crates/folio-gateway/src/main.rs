//! Folio Gateway: portfolio site at 127.0.0.1:8000 by default.
//! Landing page, project detail pages and project JSON, backed by the GitHub reconciler.
//! `folio-gateway --export <dir>` writes the pages to disk instead of serving them.

mod config;
mod export;
mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use folio_core::{CachedDirectory, GithubDirectory, Portfolio, Reconciler, RepositoryDirectory};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::GatewayConfig;
use crate::routes::AppState;

#[tokio::main]
async fn main() {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[folio-gateway] .env not loaded: {} (using system environment)", e);
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let export_dir = match args.iter().position(|a| a == "--export") {
        Some(pos) => match args.get(pos + 1) {
            Some(dir) => Some(PathBuf::from(dir)),
            None => {
                eprintln!("Usage: folio-gateway --export <DIR>");
                std::process::exit(1);
            }
        },
        None => None,
    };

    let cfg = match GatewayConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(error = %e, "configuration invalid");
            std::process::exit(1);
        }
    };

    let portfolio = match &cfg.portfolio_path {
        Some(path) => Portfolio::from_path(path),
        None => Portfolio::bundled(),
    };
    let portfolio = match portfolio {
        Ok(p) => p,
        Err(e) => {
            tracing::error!(error = %e, "portfolio content invalid");
            std::process::exit(1);
        }
    };

    let state = build_state(&cfg, portfolio);
    tracing::info!(
        account = %state.account,
        projects = state.reconciler.catalog().len(),
        version = folio_core::version(),
        "folio gateway configured"
    );

    if let Some(dir) = export_dir {
        match export::export_site(&state, &dir).await {
            Ok(_) => std::process::exit(0),
            Err(e) => {
                tracing::error!(error = %e, out = %dir.display(), "static export failed");
                std::process::exit(1);
            }
        }
    }

    let app = routes::router(state, &cfg.images_dir);
    let addr = cfg.bind_addr();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(error = %e, %addr, "bind failed");
            std::process::exit(1);
        }
    };
    tracing::info!(%addr, "listening");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server stopped");
        std::process::exit(1);
    }
}

fn build_state(cfg: &GatewayConfig, portfolio: Portfolio) -> AppState {
    let github = GithubDirectory::new(cfg.github_api_url.as_str()).with_token(cfg.github_token.clone());
    let directory: Arc<dyn RepositoryDirectory> = if cfg.cache_ttl_secs == 0 {
        Arc::new(github)
    } else {
        Arc::new(CachedDirectory::new(github, cfg.cache_ttl()))
    };

    let account = cfg
        .account
        .clone()
        .filter(|a| !a.trim().is_empty())
        .unwrap_or_else(|| portfolio.profile.account.clone());

    AppState {
        reconciler: Reconciler::new(directory, Arc::new(portfolio.catalog)),
        profile: Arc::new(portfolio.profile),
        account,
    }
}
