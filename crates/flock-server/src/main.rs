//! flock-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`, with `FLOCK_`
//! environment overrides), opens an in-process SQLite store, and serves the
//! JSON API over HTTP. Roster sync and summary generation activate only when
//! their credentials are configured.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use flock_api::AppState;
use flock_roster::{PcoClient, RosterConfig, RosterSync};
use flock_store_sqlite::SqliteStore;
use flock_summary::{Summarizer, SummaryConfig};
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Flock volunteer relationship server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

/// Runtime server configuration, deserialised from `config.toml` and
/// `FLOCK_*` environment variables.
#[derive(Deserialize, Clone)]
struct ServerConfig {
  #[serde(default = "default_host")]
  host:              String,
  #[serde(default = "default_port")]
  port:              u16,
  #[serde(default = "default_store_path")]
  store_path:        PathBuf,
  #[serde(default)]
  pco_app_id:        Option<String>,
  #[serde(default)]
  pco_secret:        Option<String>,
  #[serde(default)]
  anthropic_api_key: Option<String>,
  #[serde(default)]
  openai_api_key:    Option<String>,
}

fn default_host() -> String { "127.0.0.1".to_owned() }
fn default_port() -> u16 { 8080 }
fn default_store_path() -> PathBuf { PathBuf::from("flock.db") }

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("FLOCK"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let store_path = expand_tilde(&server_cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  let store = Arc::new(store);

  let roster = match (&server_cfg.pco_app_id, &server_cfg.pco_secret) {
    (Some(app_id), Some(secret)) => {
      let client = PcoClient::new(RosterConfig::new(app_id, secret))
        .context("failed to build roster client")?;
      tracing::info!("roster sync enabled");
      Some(Arc::new(RosterSync::new(store.clone(), client)))
    }
    _ => {
      tracing::info!("roster credentials not set; sync endpoints disabled");
      None
    }
  };

  let summarizer = match Summarizer::new(SummaryConfig {
    anthropic_key: server_cfg.anthropic_api_key.clone(),
    openai_key:    server_cfg.openai_api_key.clone(),
  }) {
    Ok(s) => {
      tracing::info!(provider = s.provider(), "summary generation enabled");
      Some(Arc::new(s))
    }
    Err(_) => {
      tracing::info!("no summary provider key set; summary endpoint disabled");
      None
    }
  };

  let state = AppState { store, roster, summarizer };
  let app = axum::Router::new()
    .nest("/api", flock_api::api_router(state))
    .layer(TraceLayer::new_for_http());

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
