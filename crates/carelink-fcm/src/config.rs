//! FCM connection settings, deserialised from the server's config file.

use std::fmt;

use serde::Deserialize;

pub const DEFAULT_ENDPOINT: &str = "https://fcm.googleapis.com";

#[derive(Clone, Deserialize)]
pub struct FcmConfig {
  /// Base URL of the FCM API; overridable for tests and proxies.
  #[serde(default = "default_endpoint")]
  pub endpoint:     String,
  pub project_id:   String,
  /// OAuth 2.0 bearer token with the `firebase.messaging` scope.
  pub access_token: String,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

fn default_endpoint() -> String { DEFAULT_ENDPOINT.to_owned() }

fn default_timeout_secs() -> u64 { 30 }

impl FcmConfig {
  /// `{endpoint}/v1/projects/{project_id}/messages:send`
  pub fn send_url(&self) -> String {
    format!(
      "{}/v1/projects/{}/messages:send",
      self.endpoint.trim_end_matches('/'),
      self.project_id
    )
  }
}

// The access token never reaches log output.
impl fmt::Debug for FcmConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("FcmConfig")
      .field("endpoint", &self.endpoint)
      .field("project_id", &self.project_id)
      .field("access_token", &"<redacted>")
      .field("timeout_secs", &self.timeout_secs)
      .finish()
  }
}
