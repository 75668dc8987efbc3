//! carelink-hooks server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite account store, and serves the emergency trigger endpoints over HTTP.
//!
//! # Account import
//!
//! Accounts are normally written by account-management code sharing the
//! store file. To seed a store from a JSON array of accounts:
//!
//! ```
//! cargo run -p carelink-hooks --bin server -- --import-accounts accounts.json
//! ```

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use carelink_core::account::SubscriberAccount;
use carelink_fanout::Dispatcher;
use carelink_fcm::FcmTransport;
use carelink_hooks::ServerConfig;
use carelink_store_sqlite::SqliteAccountStore;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "CareLink emergency trigger server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Upsert the accounts in this JSON file into the store and exit.
  #[arg(long, value_name = "FILE")]
  import_accounts: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 8080)?
    .set_default("store_path", "carelink.sqlite")?
    .add_source(config::File::from(cli.config).required(false))
    .add_source(
      config::Environment::with_prefix("CARELINK")
        .prefix_separator("_")
        .separator("__"),
    )
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let store_path = expand_tilde(&server_cfg.store_path);
  let store = SqliteAccountStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  // Helper mode: seed accounts and exit.
  if let Some(path) = &cli.import_accounts {
    let count = import_accounts(&store, path).await?;
    tracing::info!(count, "imported accounts from {}", path.display());
    return Ok(());
  }

  let fcm_cfg = server_cfg
    .fcm
    .clone()
    .context("the [fcm] config section is required to serve")?;
  tracing::info!(?fcm_cfg, "push transport configured");
  let transport =
    FcmTransport::new(fcm_cfg).context("failed to build FCM client")?;

  let dispatcher = Dispatcher::new(Arc::new(store), Arc::new(transport));
  let app = carelink_hooks::router(dispatcher);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Upsert every account in a JSON array file; returns how many were written.
async fn import_accounts(
  store: &SqliteAccountStore,
  path: &Path,
) -> anyhow::Result<usize> {
  let raw = std::fs::read_to_string(path)
    .with_context(|| format!("reading accounts file {}", path.display()))?;
  let accounts: Vec<SubscriberAccount> =
    serde_json::from_str(&raw).context("parsing accounts file")?;

  for account in &accounts {
    store
      .put_account(account)
      .await
      .with_context(|| format!("writing account {:?}", account.account_id))?;
  }
  Ok(accounts.len())
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
