//! The typed result of a round.

use carelink_core::message::EventKind;
use serde::{Deserialize, Serialize};

/// Why a round ended without sending anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
  /// A record was created with `active = false`.
  Inactive,
  /// An update that was not an active → inactive transition.
  NotCancelled,
  /// The subject's own account is missing on the cancellation path.
  SubjectNotFound,
  /// Nobody subscribes to the subject.
  NoSubscribers,
  /// Subscribers exist but none has a delivery token.
  NoDeliveryTokens,
}

/// One send the transport rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendFailure {
  pub token: String,
  pub error: String,
}

/// How a round ended. Every variant is a successful completion from the
/// trigger's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RoundOutcome {
  /// Every send was accepted.
  Delivered { kind: EventKind, sent: usize },
  /// Some sends were accepted and some were rejected.
  Degraded {
    kind:     EventKind,
    sent:     usize,
    failures: Vec<SendFailure>,
  },
  Skipped { reason: SkipReason },
  /// An unexpected error stopped the round before or during dispatch.
  Aborted { error: String },
}

impl RoundOutcome {
  pub fn skipped(reason: SkipReason) -> Self { Self::Skipped { reason } }

  /// Number of sends the transport accepted.
  pub fn sent(&self) -> usize {
    match self {
      Self::Delivered { sent, .. } | Self::Degraded { sent, .. } => *sent,
      Self::Skipped { .. } | Self::Aborted { .. } => 0,
    }
  }

  pub fn skip_reason(&self) -> Option<SkipReason> {
    match self {
      Self::Skipped { reason } => Some(*reason),
      _ => None,
    }
  }

  pub fn failures(&self) -> &[SendFailure] {
    match self {
      Self::Degraded { failures, .. } => failures,
      _ => &[],
    }
  }
}
