mod action;
mod app;
mod app_state;
mod component;
mod components;
mod footer;
mod theme;
mod widgets;

use std::sync::Arc;

use footer_proto::catalog::{load_catalog, Catalog, CatalogError};
use footer_proto::config::Config;
use footer_proto::store::{MemoryStore, Store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    std::fs::create_dir_all(footer_proto::platform::data_dir())?;
    let log_path = footer_proto::platform::log_path();

    // ── Load config ──────────────────────────────────────────────────────────
    // Read before logging starts so the configured filter applies; a broken
    // config is reported once the log is up.
    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; otherwise use the configured filter.
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| config.logging.filter.clone());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("media-footer log: {}", log_path.display());

    tracing::info!("media-footer starting…");
    if let Some(e) = config_error {
        tracing::warn!("config {}: {:#}; using defaults", Config::config_path().display(), e);
    }

    // ── Stream catalog ───────────────────────────────────────────────────────
    let catalog = match load_catalog(&config.catalog.streams_toml) {
        Ok(catalog) => catalog,
        Err(CatalogError::Io { path, source }) if source.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!("no catalog at {}; starting empty", path.display());
            Catalog::default()
        }
        Err(e) => {
            tracing::warn!("{}; starting with an empty catalog", e);
            Catalog::default()
        }
    };

    // ── Store + TUI ──────────────────────────────────────────────────────────
    let store: Arc<dyn Store> = Arc::new(MemoryStore::default());
    let app = app::App::new(store, catalog, &config);
    app.run().await?;

    tracing::info!("media-footer stopped");
    Ok(())
}
