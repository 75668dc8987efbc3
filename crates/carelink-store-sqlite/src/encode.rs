//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings. The subscription set lives in
//! its own table and is reassembled here.

use std::collections::BTreeSet;

use carelink_core::account::SubscriberAccount;
use chrono::{DateTime, Utc};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

// ─── Tokens ──────────────────────────────────────────────────────────────────

/// Empty tokens are stored as NULL so the column has one "no device" value.
pub fn encode_token(token: Option<&str>) -> Option<String> {
  token.filter(|t| !t.is_empty()).map(str::to_owned)
}

// ─── Raw rows ────────────────────────────────────────────────────────────────

/// One `accounts` row plus its subscription rows, as read from SQLite.
pub struct RawAccount {
  pub account_id: String,
  pub name:       Option<String>,
  pub fcm_token:  Option<String>,
  pub senior_ids: Vec<String>,
}

impl RawAccount {
  pub fn into_account(self) -> SubscriberAccount {
    SubscriberAccount {
      account_id:           self.account_id,
      name:                 self.name,
      connected_senior_ids: self.senior_ids.into_iter().collect::<BTreeSet<_>>(),
      fcm_token:            self.fcm_token,
    }
  }
}
