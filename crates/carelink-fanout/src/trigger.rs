//! [`Dispatcher`] — the two trigger entry points and the round boundary.

use std::{future::Future, panic::AssertUnwindSafe, sync::Arc};

use carelink_core::{
  account::display_name_or_fallback,
  emergency::{EmergencyChange, EmergencyRecord},
  message::{EventKind, build_template},
  store::AccountStore,
  transport::PushTransport,
};
use futures::FutureExt as _;
use tracing::Instrument as _;
use uuid::Uuid;

use crate::{
  RoundError, RoundOutcome, SkipReason,
  fanout::{self, panic_message},
  resolver,
};

/// Runs notification rounds against an injected store and transport.
///
/// Both handles are created once at startup and shared by every round;
/// rounds keep no state of their own between invocations.
pub struct Dispatcher<S, T> {
  store:     Arc<S>,
  transport: Arc<T>,
}

impl<S, T> Clone for Dispatcher<S, T> {
  fn clone(&self) -> Self {
    Self {
      store:     Arc::clone(&self.store),
      transport: Arc::clone(&self.transport),
    }
  }
}

impl<S, T> Dispatcher<S, T>
where
  S: AccountStore,
  T: PushTransport,
{
  pub fn new(store: Arc<S>, transport: Arc<T>) -> Self {
    Self { store, transport }
  }

  /// Handle creation of an emergency record.
  pub async fn on_create(&self, record: &EmergencyRecord) -> RoundOutcome {
    let span = tracing::info_span!(
      "round",
      round_id = %Uuid::new_v4(),
      trigger = "create",
      senior_id = %record.senior_id,
    );
    settle(self.raise(record), span).await
  }

  /// Handle an update of an emergency record.
  pub async fn on_update(&self, change: &EmergencyChange) -> RoundOutcome {
    let span = tracing::info_span!(
      "round",
      round_id = %Uuid::new_v4(),
      trigger = "update",
      senior_id = %change.after.senior_id,
    );
    settle(self.cancel(change), span).await
  }

  async fn raise(
    &self,
    record: &EmergencyRecord,
  ) -> Result<RoundOutcome, RoundError> {
    if !record.active {
      tracing::info!("emergency not active, skipping notification");
      return Ok(RoundOutcome::skipped(SkipReason::Inactive));
    }

    let recipients =
      resolver::subscribers(self.store.as_ref(), &record.senior_id).await?;
    if recipients.is_empty() {
      tracing::info!("no subscribers found for senior");
      return Ok(RoundOutcome::skipped(SkipReason::NoSubscribers));
    }

    let template = build_template(
      EventKind::Raised,
      &record.senior_id,
      display_name_or_fallback(record.senior_name.as_deref()),
      record.location.as_ref(),
    );

    Ok(fanout::dispatch(self.transport.as_ref(), &template, &recipients).await)
  }

  async fn cancel(
    &self,
    change: &EmergencyChange,
  ) -> Result<RoundOutcome, RoundError> {
    if !change.is_cancellation() {
      tracing::debug!(
        before = change.before.active,
        after = change.after.active,
        "update is not a cancellation"
      );
      return Ok(RoundOutcome::skipped(SkipReason::NotCancelled));
    }

    let senior_id = change.after.senior_id.as_str();

    let Some(subject) = resolver::subject(self.store.as_ref(), senior_id).await?
    else {
      tracing::info!("senior account not found");
      return Ok(RoundOutcome::skipped(SkipReason::SubjectNotFound));
    };

    let recipients = resolver::subscribers(self.store.as_ref(), senior_id).await?;
    if recipients.is_empty() {
      tracing::info!("no subscribers found for senior");
      return Ok(RoundOutcome::skipped(SkipReason::NoSubscribers));
    }

    let template = build_template(
      EventKind::Cancelled,
      senior_id,
      subject.display_name(),
      None,
    );

    Ok(fanout::dispatch(self.transport.as_ref(), &template, &recipients).await)
  }
}

/// The round boundary: errors and panics become [`RoundOutcome::Aborted`].
async fn settle<F>(round: F, span: tracing::Span) -> RoundOutcome
where
  F: Future<Output = Result<RoundOutcome, RoundError>>,
{
  let result = AssertUnwindSafe(round)
    .catch_unwind()
    .instrument(span.clone())
    .await
    .unwrap_or_else(|panic| {
      Err(RoundError::Panicked(panic_message(&*panic)))
    });

  match result {
    Ok(outcome) => outcome,
    Err(e) => {
      span.in_scope(|| tracing::error!(error = %e, "notification round aborted"));
      RoundOutcome::Aborted { error: e.to_string() }
    }
  }
}
