//! FCM HTTP v1 request and response bodies.
//!
//! Borrowed views over a [`NotificationMessage`]; nothing here outlives a
//! single send.

use std::collections::BTreeMap;

use carelink_core::message::{NotificationMessage, Priority};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct SendRequest<'a> {
  pub message: WireMessage<'a>,
}

#[derive(Debug, Serialize)]
pub struct WireMessage<'a> {
  pub token:        &'a str,
  pub notification: WireNotification<'a>,
  pub data:         &'a BTreeMap<String, String>,
  pub android:      WireAndroid<'a>,
  pub apns:         WireApns<'a>,
}

#[derive(Debug, Serialize)]
pub struct WireNotification<'a> {
  pub title: &'a str,
  pub body:  &'a str,
}

#[derive(Debug, Serialize)]
pub struct WireAndroid<'a> {
  /// `"NORMAL"` or `"HIGH"`.
  pub priority:     &'static str,
  pub notification: WireAndroidNotification<'a>,
}

#[derive(Debug, Serialize)]
pub struct WireAndroidNotification<'a> {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub sound:                 Option<&'a str>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub notification_priority: Option<&'static str>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub channel_id:            Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct WireApns<'a> {
  pub payload: WireApnsPayload<'a>,
}

#[derive(Debug, Serialize)]
pub struct WireApnsPayload<'a> {
  pub aps: WireAps<'a>,
}

#[derive(Debug, Serialize)]
pub struct WireAps<'a> {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub sound: Option<&'a str>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub badge: Option<u32>,
}

/// Successful `messages:send` response.
#[derive(Debug, Deserialize)]
pub struct SendResponse {
  /// `projects/{project_id}/messages/{message_id}`
  pub name: String,
}

fn message_priority(p: Priority) -> &'static str {
  match p {
    Priority::Normal => "NORMAL",
    Priority::High => "HIGH",
  }
}

fn notification_priority(p: Priority) -> &'static str {
  match p {
    Priority::Normal => "PRIORITY_DEFAULT",
    Priority::High => "PRIORITY_HIGH",
  }
}

impl<'a> From<&'a NotificationMessage> for WireMessage<'a> {
  fn from(m: &'a NotificationMessage) -> Self {
    let android = &m.android.notification;
    WireMessage {
      token:        &m.token,
      notification: WireNotification {
        title: &m.notification.title,
        body:  &m.notification.body,
      },
      data:         &m.data,
      android:      WireAndroid {
        priority:     message_priority(m.android.priority),
        notification: WireAndroidNotification {
          sound:                 android.sound.as_deref(),
          notification_priority: android.priority.map(notification_priority),
          channel_id:            android.channel_id.as_deref(),
        },
      },
      apns:         WireApns {
        payload: WireApnsPayload {
          aps: WireAps {
            sound: m.apns.sound.as_deref(),
            badge: m.apns.badge,
          },
        },
      },
    }
  }
}
