//! The `AccountStore` trait — read access to user accounts.
//!
//! The trait is implemented by storage backends (e.g.
//! `carelink-store-sqlite`). The fan-out depends on this abstraction, not on
//! any concrete backend, and never writes through it.

use std::future::Future;

use crate::account::SubscriberAccount;

/// Read-only queries the fan-out issues against the account store.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait AccountStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// All accounts whose `connected_senior_ids` contains `senior_id`.
  ///
  /// Ordering is unspecified. An empty result is not an error.
  fn subscribers_of<'a>(
    &'a self,
    senior_id: &'a str,
  ) -> impl Future<Output = Result<Vec<SubscriberAccount>, Self::Error>> + Send + 'a;

  /// Point lookup of a single account. Returns `None` if not found.
  fn get_account<'a>(
    &'a self,
    account_id: &'a str,
  ) -> impl Future<Output = Result<Option<SubscriberAccount>, Self::Error>>
  + Send
  + 'a;
}
