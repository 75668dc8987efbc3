//! Concurrent dispatch of one template to many recipients.
//!
//! All sends are issued together on the current task and joined; a rejected
//! or panicking send never cancels or delays its siblings.

use std::{any::Any, panic::AssertUnwindSafe};

use carelink_core::{
  account::SubscriberAccount,
  message::MessageTemplate,
  transport::PushTransport,
};
use futures::{FutureExt as _, future::join_all};

use crate::{RoundOutcome, SendFailure, SkipReason};

/// Send `template` to every recipient that has a delivery token.
///
/// Recipients without a token are skipped silently.
pub async fn dispatch<T: PushTransport>(
  transport: &T,
  template: &MessageTemplate,
  recipients: &[SubscriberAccount],
) -> RoundOutcome {
  let messages: Vec<_> = recipients
    .iter()
    .filter_map(|account| {
      let token = account.delivery_token();
      if token.is_none() {
        tracing::debug!(account_id = %account.account_id, "no delivery token");
      }
      token.map(|t| template.for_token(t))
    })
    .collect();

  if messages.is_empty() {
    tracing::info!("no valid delivery tokens found");
    return RoundOutcome::skipped(SkipReason::NoDeliveryTokens);
  }

  let results = join_all(messages.iter().map(|m| async move {
    match AssertUnwindSafe(transport.send(m)).catch_unwind().await {
      Ok(Ok(id)) => Ok(id),
      Ok(Err(e)) => Err(e.to_string()),
      Err(panic) => Err(format!("send panicked: {}", panic_message(&*panic))),
    }
  }))
  .await;

  let mut sent = 0;
  let mut failures = Vec::new();
  for (message, result) in messages.iter().zip(results) {
    match result {
      Ok(id) => {
        tracing::debug!(message_id = %id, "notification accepted");
        sent += 1;
      }
      Err(e) => {
        tracing::warn!(
          token = %token_suffix(&message.token),
          error = %e,
          "notification send failed"
        );
        failures.push(SendFailure {
          token: message.token.clone(),
          error: e,
        });
      }
    }
  }

  tracing::info!(
    kind = template.kind.as_str(),
    sent,
    failed = failures.len(),
    "round dispatched"
  );

  if failures.is_empty() {
    RoundOutcome::Delivered { kind: template.kind, sent }
  } else {
    RoundOutcome::Degraded { kind: template.kind, sent, failures }
  }
}

/// Best-effort text of a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
  if let Some(msg) = payload.downcast_ref::<&'static str>() {
    (*msg).to_owned()
  } else if let Some(msg) = payload.downcast_ref::<String>() {
    msg.clone()
  } else {
    "unknown panic".to_owned()
  }
}

/// The last few characters of a token, for log lines.
fn token_suffix(token: &str) -> &str {
  let start = token
    .char_indices()
    .rev()
    .nth(7)
    .map(|(i, _)| i)
    .unwrap_or(0);
  &token[start..]
}

#[cfg(test)]
mod tests {
  use super::{panic_message, token_suffix};

  #[test]
  fn token_suffix_keeps_last_eight_chars() {
    assert_eq!(token_suffix("abcdefghijkl"), "efghijkl");
    assert_eq!(token_suffix("short"), "short");
    assert_eq!(token_suffix(""), "");
  }

  #[test]
  fn panic_message_reads_str_and_string_payloads() {
    let boxed: Box<dyn std::any::Any + Send> = Box::new("boom");
    assert_eq!(panic_message(&*boxed), "boom");

    let boxed: Box<dyn std::any::Any + Send> = Box::new(String::from("bang"));
    assert_eq!(panic_message(&*boxed), "bang");

    let boxed: Box<dyn std::any::Any + Send> = Box::new(7_u32);
    assert_eq!(panic_message(&*boxed), "unknown panic");
  }
}
