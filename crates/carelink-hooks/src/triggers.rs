//! Handlers for `/triggers` endpoints.
//!
//! | Method | Path | Body |
//! |--------|------|------|
//! | `POST` | `/triggers/emergencies/created` | emergency record snapshot |
//! | `POST` | `/triggers/emergencies/updated` | `{"before": …, "after": …}` |
//!
//! Both answer 200 with the [`RoundOutcome`] whenever a round ran, including
//! aborted and degraded rounds. The trigger source retries anything else.

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
};
use carelink_core::{
  emergency::{EmergencyChange, EmergencyRecord},
  store::AccountStore,
  transport::PushTransport,
};
use carelink_fanout::{Dispatcher, RoundOutcome};
use serde_json::Value;

use crate::error::ApiError;

/// `POST /triggers/emergencies/created`
pub async fn created<S, T>(
  State(dispatcher): State<Dispatcher<S, T>>,
  payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<RoundOutcome>, ApiError>
where
  S: AccountStore + 'static,
  T: PushTransport + 'static,
{
  let Json(doc) = payload?;
  let record = EmergencyRecord::from_document(doc)?;
  Ok(Json(dispatcher.on_create(&record).await))
}

/// `POST /triggers/emergencies/updated`
pub async fn updated<S, T>(
  State(dispatcher): State<Dispatcher<S, T>>,
  payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<RoundOutcome>, ApiError>
where
  S: AccountStore + 'static,
  T: PushTransport + 'static,
{
  let Json(doc) = payload?;
  let change = EmergencyChange::from_document(doc)?;
  Ok(Json(dispatcher.on_update(&change).await))
}
