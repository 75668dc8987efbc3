//! The `PushTransport` trait — the outbound side of a round.

use std::future::Future;

use crate::message::NotificationMessage;

/// Submits a single message to a push delivery service.
///
/// Delivery and retry semantics past acceptance belong to the transport. The
/// fan-out issues many `send` calls concurrently on one task, so
/// implementations must not rely on being called sequentially.
pub trait PushTransport: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Submit `message` and return the transport's identifier for it.
  fn send<'a>(
    &'a self,
    message: &'a NotificationMessage,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'a;
}
