//! Team member — the authenticated actor referenced by interactions.
//!
//! Authentication itself is out of scope; the record exists so interactions
//! can attribute an author and the dashboard can report per-member activity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Admin,
  #[default]
  Member,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
  pub member_id:  Uuid,
  pub first_name: String,
  pub last_name:  String,
  pub email:      String,
  pub role:       Role,
  pub active:     bool,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl TeamMember {
  pub fn full_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
  }

  pub fn is_admin(&self) -> bool { self.role == Role::Admin }
}

/// Input to [`crate::store::VolunteerStore::add_team_member`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewTeamMember {
  pub first_name: String,
  pub last_name:  String,
  pub email:      String,
  #[serde(default)]
  pub role:       Role,
}
