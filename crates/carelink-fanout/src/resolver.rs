//! Recipient resolution against an [`AccountStore`].

use carelink_core::{account::SubscriberAccount, store::AccountStore};

use crate::RoundError;

/// Every account subscribed to `senior_id`, in store order.
pub async fn subscribers<S: AccountStore>(
  store: &S,
  senior_id: &str,
) -> Result<Vec<SubscriberAccount>, RoundError> {
  let accounts = store
    .subscribers_of(senior_id)
    .await
    .map_err(RoundError::store)?;
  tracing::debug!(count = accounts.len(), "resolved subscribers");
  Ok(accounts)
}

/// The subject's own account, used for its display name on cancellation.
pub async fn subject<S: AccountStore>(
  store: &S,
  senior_id: &str,
) -> Result<Option<SubscriberAccount>, RoundError> {
  store.get_account(senior_id).await.map_err(RoundError::store)
}
