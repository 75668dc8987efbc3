//! Emergency records — the entity whose lifecycle drives notification rounds.
//!
//! Records arrive as untyped documents from the trigger source. They are
//! parsed and validated here, at the boundary, so the fan-out only ever sees
//! well-formed values.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Location ────────────────────────────────────────────────────────────────

/// A WGS-84 coordinate attached to a raised emergency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
  #[serde(alias = "lat")]
  pub latitude:  f64,
  #[serde(alias = "lon", alias = "lng")]
  pub longitude: f64,
}

impl Location {
  pub fn new(latitude: f64, longitude: f64) -> Self {
    Self { latitude, longitude }
  }

  fn validate(&self) -> Result<()> {
    if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
      return Err(Error::InvalidLatitude(self.latitude));
    }
    if !self.longitude.is_finite()
      || !(-180.0..=180.0).contains(&self.longitude)
    {
      return Err(Error::InvalidLongitude(self.longitude));
    }
    Ok(())
  }
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// A snapshot of one emergency document.
///
/// Only `active` ever changes after creation, and only from `true` to
/// `false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyRecord {
  /// The subject (senior) this emergency belongs to.
  pub senior_id:   String,
  pub senior_name: Option<String>,
  /// An absent flag is treated as inactive.
  #[serde(default)]
  pub active:      bool,
  pub location:    Option<Location>,
}

impl EmergencyRecord {
  /// Parse an untyped document and validate it.
  pub fn from_document(doc: serde_json::Value) -> Result<Self> {
    let record: Self = serde_json::from_value(doc)?;
    record.validate()?;
    Ok(record)
  }

  /// Reject records the fan-out cannot address or render.
  pub fn validate(&self) -> Result<()> {
    if self.senior_id.trim().is_empty() {
      return Err(Error::MissingSeniorId);
    }
    if let Some(location) = &self.location {
      location.validate()?;
    }
    Ok(())
  }
}

// ─── Change ──────────────────────────────────────────────────────────────────

/// The payload of an update trigger: the record before and after the write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyChange {
  pub before: EmergencyRecord,
  pub after:  EmergencyRecord,
}

impl EmergencyChange {
  /// Parse an untyped `{before, after}` document and validate both halves.
  pub fn from_document(doc: serde_json::Value) -> Result<Self> {
    let change: Self = serde_json::from_value(doc)?;
    change.validate()?;
    Ok(change)
  }

  pub fn validate(&self) -> Result<()> {
    self.before.validate()?;
    self.after.validate()
  }

  /// `true` only for a strict active → inactive transition.
  pub fn is_cancellation(&self) -> bool {
    self.before.active && !self.after.active
  }
}
