//! [`FcmTransport`] — the FCM HTTP v1 implementation of [`PushTransport`].

use std::time::Duration;

use carelink_core::{message::NotificationMessage, transport::PushTransport};
use reqwest::Client;

use crate::{
  Error, FcmConfig, Result,
  wire::{SendRequest, SendResponse, WireMessage},
};

/// Async HTTP client for `messages:send`.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct FcmTransport {
  client:       Client,
  send_url:     String,
  access_token: String,
}

impl FcmTransport {
  pub fn new(config: FcmConfig) -> Result<Self> {
    if config.project_id.trim().is_empty() {
      return Err(Error::InvalidConfig("project_id is empty"));
    }
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()?;
    Ok(Self {
      client,
      send_url: config.send_url(),
      access_token: config.access_token,
    })
  }
}

impl PushTransport for FcmTransport {
  type Error = Error;

  async fn send(&self, message: &NotificationMessage) -> Result<String> {
    let request = SendRequest { message: WireMessage::from(message) };

    let resp = self
      .client
      .post(&self.send_url)
      .bearer_auth(&self.access_token)
      .json(&request)
      .send()
      .await?;

    let status = resp.status();
    if !status.is_success() {
      let body = resp.text().await.unwrap_or_default();
      tracing::debug!(%status, "fcm send rejected");
      return Err(Error::Rejected { status: status.as_u16(), body });
    }

    let accepted: SendResponse = resp.json().await?;
    Ok(accepted.name)
  }
}
