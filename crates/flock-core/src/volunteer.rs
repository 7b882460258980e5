//! Volunteer — the canonical identity record.
//!
//! A volunteer is either created manually or reconciled from the external
//! roster service. The roster id, when present, is the natural key for
//! reconciliation and is unique across the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A volunteer as stored. `roster_id = None` means the record was created by
/// hand and has never been touched by a sync.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Volunteer {
  pub volunteer_id:   Uuid,
  pub roster_id:      Option<String>,
  pub first_name:     String,
  pub last_name:      String,
  pub email:          Option<String>,
  pub phone:          Option<String>,
  pub address:        Option<String>,
  /// Locally-curated notes; never overwritten by sync.
  pub notes:          Option<String>,
  /// Denormalised cache of team names, refreshed on demand from the roster
  /// service. Not authoritative.
  pub teams:          Vec<String>,
  /// `None` until the first sync touches this record.
  pub last_synced_at: Option<DateTime<Utc>>,
  pub created_at:     DateTime<Utc>,
  pub updated_at:     DateTime<Utc>,
}

impl Volunteer {
  pub fn full_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
  }
}

/// Input to [`crate::store::VolunteerStore::add_volunteer`] — manual creation.
/// Ids and timestamps are always assigned by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct NewVolunteer {
  pub first_name: String,
  pub last_name:  String,
  #[serde(default)]
  pub email:      Option<String>,
  #[serde(default)]
  pub phone:      Option<String>,
  #[serde(default)]
  pub address:    Option<String>,
  #[serde(default)]
  pub notes:      Option<String>,
}

/// Partial update for manual edits. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VolunteerUpdate {
  pub first_name: Option<String>,
  pub last_name:  Option<String>,
  pub email:      Option<String>,
  pub phone:      Option<String>,
  pub address:    Option<String>,
  pub notes:      Option<String>,
}

/// The normalised output of roster extraction and the input to
/// [`crate::store::VolunteerStore::upsert_synced`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterPerson {
  pub roster_id:  String,
  pub first_name: String,
  pub last_name:  String,
  pub email:      Option<String>,
  pub phone:      Option<String>,
  /// Single line, comma-joined street/city/state/zip with empty parts
  /// omitted.
  pub address:    Option<String>,
}

/// Whether an upsert created a fresh row or overwrote an existing one.
#[derive(Debug, Clone)]
pub enum UpsertOutcome {
  Created(Volunteer),
  Updated(Volunteer),
}

impl UpsertOutcome {
  pub fn volunteer(&self) -> &Volunteer {
    match self {
      Self::Created(v) | Self::Updated(v) => v,
    }
  }
}
