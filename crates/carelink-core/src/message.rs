//! Notification payloads — what a recipient's device receives.
//!
//! A [`MessageTemplate`] is built once per round by [`build_template`] and
//! bound to each recipient's delivery token with [`MessageTemplate::for_token`].
//! Messages are never persisted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::emergency::Location;

/// Data key carrying the routing string the client parses.
pub const PAYLOAD_KEY: &str = "payload";
/// Data key carrying the client-side routing hint.
pub const CLICK_ACTION_KEY: &str = "click_action";
pub const CLICK_ACTION: &str = "FLUTTER_NOTIFICATION_CLICK";
pub const DEFAULT_SOUND: &str = "default";
pub const HIGH_IMPORTANCE_CHANNEL: &str = "high_importance_channel";

// ─── Event kind ──────────────────────────────────────────────────────────────

/// Which lifecycle transition a round is announcing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
  /// A new active emergency.
  Raised,
  /// An active emergency was switched off.
  Cancelled,
}

impl EventKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Raised => "raised",
      Self::Cancelled => "cancelled",
    }
  }

  /// The routing string placed under [`PAYLOAD_KEY`].
  ///
  /// - raised: `emergency:{id}:{lat},{lon}` or `emergency:{id}:unknown`
  /// - cancelled: `emergency_cancelled:{id}`
  pub fn payload(&self, senior_id: &str, location: Option<&Location>) -> String {
    match self {
      Self::Raised => match location {
        // `+ 0.0` folds -0.0 into 0.0.
        Some(loc) => format!(
          "emergency:{senior_id}:{},{}",
          loc.latitude + 0.0,
          loc.longitude + 0.0
        ),
        None => format!("emergency:{senior_id}:unknown"),
      },
      Self::Cancelled => format!("emergency_cancelled:{senior_id}"),
    }
  }

  fn title(&self) -> &'static str {
    match self {
      Self::Raised => "Emergency Alert!",
      Self::Cancelled => "Emergency Cancelled",
    }
  }

  fn body(&self, name: &str) -> String {
    match self {
      Self::Raised => format!("{name} needs help! Tap to view location."),
      Self::Cancelled => {
        format!("{name} is now safe. Emergency has been cancelled.")
      }
    }
  }
}

// ─── Platform directives ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
  #[default]
  Normal,
  High,
}

/// The user-visible part of a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
  pub title: String,
  pub body:  String,
}

/// Android delivery hints.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AndroidConfig {
  /// Transport-level delivery priority.
  pub priority:     Priority,
  pub notification: AndroidNotification,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AndroidNotification {
  pub sound:      Option<String>,
  /// Display priority of the notification itself.
  pub priority:   Option<Priority>,
  pub channel_id: Option<String>,
}

/// iOS (APNs `aps` dictionary) delivery hints.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApnsConfig {
  pub sound: Option<String>,
  pub badge: Option<u32>,
}

// ─── Template ────────────────────────────────────────────────────────────────

/// Everything in a [`NotificationMessage`] except the target token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageTemplate {
  pub kind:         EventKind,
  pub notification: Notification,
  pub data:         BTreeMap<String, String>,
  pub android:      AndroidConfig,
  pub apns:         ApnsConfig,
}

impl MessageTemplate {
  /// Bind the template to one recipient's delivery token.
  pub fn for_token(&self, token: impl Into<String>) -> NotificationMessage {
    NotificationMessage {
      token:        token.into(),
      notification: self.notification.clone(),
      data:         self.data.clone(),
      android:      self.android.clone(),
      apns:         self.apns.clone(),
    }
  }

  /// The routing string under [`PAYLOAD_KEY`].
  pub fn payload(&self) -> Option<&str> {
    self.data.get(PAYLOAD_KEY).map(String::as_str)
  }
}

/// A push notification addressed to a single device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationMessage {
  pub token:        String,
  pub notification: Notification,
  pub data:         BTreeMap<String, String>,
  pub android:      AndroidConfig,
  pub apns:         ApnsConfig,
}

impl NotificationMessage {
  pub fn payload(&self) -> Option<&str> {
    self.data.get(PAYLOAD_KEY).map(String::as_str)
  }
}

// ─── Builder ─────────────────────────────────────────────────────────────────

/// Build the message template for one round.
///
/// Pure: no lookups happen here. `location` is ignored for
/// [`EventKind::Cancelled`].
pub fn build_template(
  kind: EventKind,
  senior_id: &str,
  name: &str,
  location: Option<&Location>,
) -> MessageTemplate {
  let data = BTreeMap::from([
    (PAYLOAD_KEY.to_owned(), kind.payload(senior_id, location)),
    (CLICK_ACTION_KEY.to_owned(), CLICK_ACTION.to_owned()),
  ]);

  // Cancellations carry no display-priority override on Android.
  let notification_priority = match kind {
    EventKind::Raised => Some(Priority::High),
    EventKind::Cancelled => None,
  };

  MessageTemplate {
    kind,
    notification: Notification {
      title: kind.title().to_owned(),
      body:  kind.body(name),
    },
    data,
    android: AndroidConfig {
      priority:     Priority::High,
      notification: AndroidNotification {
        sound:      Some(DEFAULT_SOUND.to_owned()),
        priority:   notification_priority,
        channel_id: Some(HIGH_IMPORTANCE_CHANNEL.to_owned()),
      },
    },
    apns: ApnsConfig {
      sound: Some(DEFAULT_SOUND.to_owned()),
      badge: Some(1),
    },
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn raised_with_location() {
    let loc = Location::new(1.0, 2.0);
    let t = build_template(EventKind::Raised, "S1", "Alice", Some(&loc));

    assert_eq!(t.notification.title, "Emergency Alert!");
    assert_eq!(t.notification.body, "Alice needs help! Tap to view location.");
    assert_eq!(t.payload(), Some("emergency:S1:1,2"));
    assert_eq!(
      t.data.get(CLICK_ACTION_KEY).map(String::as_str),
      Some("FLUTTER_NOTIFICATION_CLICK")
    );
  }

  #[test]
  fn raised_keeps_fractional_coordinates() {
    let loc = Location::new(-33.925, 18.4241);
    let t = build_template(EventKind::Raised, "S1", "Alice", Some(&loc));
    assert_eq!(t.payload(), Some("emergency:S1:-33.925,18.4241"));
  }

  #[test]
  fn raised_renders_negative_zero_as_zero() {
    let loc = Location::new(-0.0, -0.0);
    let t = build_template(EventKind::Raised, "S1", "Alice", Some(&loc));
    assert_eq!(t.payload(), Some("emergency:S1:0,0"));
  }

  #[test]
  fn raised_without_location_is_unknown() {
    let t = build_template(EventKind::Raised, "S9", "Bob", None);
    assert_eq!(t.payload(), Some("emergency:S9:unknown"));
  }

  #[test]
  fn raised_delivery_hints() {
    let t = build_template(EventKind::Raised, "S1", "Alice", None);

    assert_eq!(t.android.priority, Priority::High);
    assert_eq!(t.android.notification.priority, Some(Priority::High));
    assert_eq!(t.android.notification.sound.as_deref(), Some("default"));
    assert_eq!(
      t.android.notification.channel_id.as_deref(),
      Some("high_importance_channel")
    );
    assert_eq!(t.apns.sound.as_deref(), Some("default"));
    assert_eq!(t.apns.badge, Some(1));
  }

  #[test]
  fn cancelled_ignores_location() {
    let loc = Location::new(1.0, 2.0);
    let t = build_template(EventKind::Cancelled, "S1", "Senior", Some(&loc));

    assert_eq!(t.notification.title, "Emergency Cancelled");
    assert_eq!(
      t.notification.body,
      "Senior is now safe. Emergency has been cancelled."
    );
    assert_eq!(t.payload(), Some("emergency_cancelled:S1"));
    assert_eq!(t.android.priority, Priority::High);
    assert_eq!(t.android.notification.priority, None);
    assert_eq!(t.apns.badge, Some(1));
  }

  #[test]
  fn for_token_copies_everything_but_the_token() {
    let t = build_template(EventKind::Raised, "S1", "Alice", None);
    let a = t.for_token("T1");
    let b = t.for_token("T2");

    assert_eq!(a.token, "T1");
    assert_eq!(b.token, "T2");
    assert_eq!(a.notification, b.notification);
    assert_eq!(a.data, t.data);
    assert_eq!(a.android, t.android);
    assert_eq!(a.apns, t.apns);
  }
}
