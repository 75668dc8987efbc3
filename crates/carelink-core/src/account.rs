//! User accounts as seen by the fan-out.
//!
//! Accounts are owned by account-management code elsewhere; the fan-out only
//! reads them. The subject's own account has the same shape and is looked up
//! by id on the cancellation path.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Display name used when a subject has no usable name on record.
pub const FALLBACK_SENIOR_NAME: &str = "Senior";

/// A person who may subscribe to one or more subjects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberAccount {
  pub account_id:           String,
  pub name:                 Option<String>,
  /// Subjects this account wants emergency notifications about.
  #[serde(default)]
  pub connected_senior_ids: BTreeSet<String>,
  /// Device delivery token; absent when the user has no registered device.
  pub fcm_token:            Option<String>,
}

impl SubscriberAccount {
  pub fn new(account_id: impl Into<String>) -> Self {
    Self {
      account_id: account_id.into(),
      ..Self::default()
    }
  }

  /// The delivery token, if present and non-empty.
  pub fn delivery_token(&self) -> Option<&str> {
    self.fcm_token.as_deref().filter(|t| !t.is_empty())
  }

  /// The account's name, or [`FALLBACK_SENIOR_NAME`] when absent or blank.
  pub fn display_name(&self) -> &str {
    display_name_or_fallback(self.name.as_deref())
  }
}

pub fn display_name_or_fallback(name: Option<&str>) -> &str {
  name
    .filter(|n| !n.trim().is_empty())
    .unwrap_or(FALLBACK_SENIOR_NAME)
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn empty_token_is_not_a_delivery_token() {
    let mut account = SubscriberAccount::new("u1");
    assert_eq!(account.delivery_token(), None);

    account.fcm_token = Some(String::new());
    assert_eq!(account.delivery_token(), None);

    account.fcm_token = Some("T1".into());
    assert_eq!(account.delivery_token(), Some("T1"));
  }

  #[test]
  fn display_name_falls_back_to_senior() {
    let mut account = SubscriberAccount::new("S1");
    assert_eq!(account.display_name(), "Senior");

    account.name = Some("   ".into());
    assert_eq!(account.display_name(), "Senior");

    account.name = Some("Alice".into());
    assert_eq!(account.display_name(), "Alice");
  }

  #[test]
  fn usable_names_are_kept_verbatim() {
    assert_eq!(display_name_or_fallback(Some("  Alice ")), "  Alice ");
    assert_eq!(display_name_or_fallback(Some("\t\n")), "Senior");
    assert_eq!(display_name_or_fallback(None), "Senior");
  }

  #[test]
  fn deserialises_document_fields() {
    let account: SubscriberAccount = serde_json::from_value(json!({
      "accountId": "u1",
      "connectedSeniorIds": ["S1", "S2", "S1"],
      "fcmToken": "T1",
    }))
    .unwrap();

    assert!(account.connected_senior_ids.contains("S1"));
    assert!(account.connected_senior_ids.contains("S2"));
    assert_eq!(account.connected_senior_ids.len(), 2);
    assert!(account.name.is_none());
  }
}
