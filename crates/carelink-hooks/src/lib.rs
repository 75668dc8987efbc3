//! HTTP trigger surface for CareLink.
//!
//! Exposes an axum [`Router`] that turns inbound emergency lifecycle events
//! into notification rounds on a [`Dispatcher`]. Authentication of the
//! trigger source is left to the deployment (reverse proxy, private network).
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = carelink_hooks::router(Dispatcher::new(store, transport));
//! ```

pub mod error;
pub mod triggers;

use std::path::PathBuf;

use axum::{
  Router,
  routing::{get, post},
};
use carelink_core::{store::AccountStore, transport::PushTransport};
use carelink_fanout::Dispatcher;
use carelink_fcm::FcmConfig;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `CARELINK_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  /// Required to serve; not needed for account import.
  pub fcm:        Option<FcmConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the trigger router for `dispatcher`.
pub fn router<S, T>(dispatcher: Dispatcher<S, T>) -> Router
where
  S: AccountStore + 'static,
  T: PushTransport + 'static,
{
  Router::new()
    .route("/healthz", get(healthz))
    .route(
      "/triggers/emergencies/created",
      post(triggers::created::<S, T>),
    )
    .route(
      "/triggers/emergencies/updated",
      post(triggers::updated::<S, T>),
    )
    .layer(TraceLayer::new_for_http())
    .with_state(dispatcher)
}

async fn healthz() -> &'static str { "ok" }
