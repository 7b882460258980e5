//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, calendar dates as `YYYY-MM-DD`
//! (which compares correctly as text), string lists as compact JSON, and
//! UUIDs as hyphenated lowercase strings.

use chrono::{DateTime, NaiveDate, Utc};
use flock_core::{
  interaction::Interaction,
  member::{Role, TeamMember},
  volunteer::Volunteer,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Role ────────────────────────────────────────────────────────────────────

pub fn encode_role(r: Role) -> &'static str {
  match r {
    Role::Admin => "admin",
    Role::Member => "member",
  }
}

pub fn decode_role(s: &str) -> Result<Role> {
  match s {
    "admin" => Ok(Role::Admin),
    "member" => Ok(Role::Member),
    other => Err(Error::Decode(format!("unknown role: {other:?}"))),
  }
}

// ─── String lists ────────────────────────────────────────────────────────────

pub fn encode_strings(items: &[String]) -> Result<String> {
  Ok(serde_json::to_string(items)?)
}

pub fn decode_strings(s: &str) -> Result<Vec<String>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `volunteers` row.
pub struct RawVolunteer {
  pub volunteer_id:   String,
  pub roster_id:      Option<String>,
  pub first_name:     String,
  pub last_name:      String,
  pub email:          Option<String>,
  pub phone:          Option<String>,
  pub address:        Option<String>,
  pub notes:          Option<String>,
  pub teams:          String,
  pub last_synced_at: Option<String>,
  pub created_at:     String,
  pub updated_at:     String,
}

impl RawVolunteer {
  /// Column list matching [`RawVolunteer::from_row`].
  pub const COLUMNS: &'static str = "volunteer_id, roster_id, first_name, \
     last_name, email, phone, address, notes, teams, last_synced_at, \
     created_at, updated_at";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      volunteer_id:   row.get(0)?,
      roster_id:      row.get(1)?,
      first_name:     row.get(2)?,
      last_name:      row.get(3)?,
      email:          row.get(4)?,
      phone:          row.get(5)?,
      address:        row.get(6)?,
      notes:          row.get(7)?,
      teams:          row.get(8)?,
      last_synced_at: row.get(9)?,
      created_at:     row.get(10)?,
      updated_at:     row.get(11)?,
    })
  }

  pub fn into_volunteer(self) -> Result<Volunteer> {
    Ok(Volunteer {
      volunteer_id:   decode_uuid(&self.volunteer_id)?,
      roster_id:      self.roster_id,
      first_name:     self.first_name,
      last_name:      self.last_name,
      email:          self.email,
      phone:          self.phone,
      address:        self.address,
      notes:          self.notes,
      teams:          decode_strings(&self.teams)?,
      last_synced_at: self
        .last_synced_at
        .as_deref()
        .map(decode_dt)
        .transpose()?,
      created_at:     decode_dt(&self.created_at)?,
      updated_at:     decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw strings read directly from an `interactions` row.
pub struct RawInteraction {
  pub interaction_id:          String,
  pub volunteer_id:            String,
  pub member_id:               Option<String>,
  pub interaction_date:        String,
  pub discussion_notes:        String,
  pub topics:                  String,
  pub needs_followup:          bool,
  pub followup_date:           Option<String>,
  pub followup_notes:          Option<String>,
  pub followup_completed:      bool,
  pub followup_completed_date: Option<String>,
  pub created_at:              String,
  pub updated_at:              String,
}

impl RawInteraction {
  /// Column list matching [`RawInteraction::from_row`].
  pub const COLUMNS: &'static str = "interaction_id, volunteer_id, member_id, \
     interaction_date, discussion_notes, topics, needs_followup, \
     followup_date, followup_notes, followup_completed, \
     followup_completed_date, created_at, updated_at";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      interaction_id:          row.get(0)?,
      volunteer_id:            row.get(1)?,
      member_id:               row.get(2)?,
      interaction_date:        row.get(3)?,
      discussion_notes:        row.get(4)?,
      topics:                  row.get(5)?,
      needs_followup:          row.get(6)?,
      followup_date:           row.get(7)?,
      followup_notes:          row.get(8)?,
      followup_completed:      row.get(9)?,
      followup_completed_date: row.get(10)?,
      created_at:              row.get(11)?,
      updated_at:              row.get(12)?,
    })
  }

  pub fn into_interaction(self) -> Result<Interaction> {
    Ok(Interaction {
      interaction_id:          decode_uuid(&self.interaction_id)?,
      volunteer_id:            decode_uuid(&self.volunteer_id)?,
      member_id:               self
        .member_id
        .as_deref()
        .map(decode_uuid)
        .transpose()?,
      interaction_date:        decode_date(&self.interaction_date)?,
      discussion_notes:        self.discussion_notes,
      topics:                  decode_strings(&self.topics)?,
      needs_followup:          self.needs_followup,
      followup_date:           self
        .followup_date
        .as_deref()
        .map(decode_date)
        .transpose()?,
      followup_notes:          self.followup_notes,
      followup_completed:      self.followup_completed,
      followup_completed_date: self
        .followup_completed_date
        .as_deref()
        .map(decode_date)
        .transpose()?,
      created_at:              decode_dt(&self.created_at)?,
      updated_at:              decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw strings read directly from a `team_members` row.
pub struct RawMember {
  pub member_id:  String,
  pub first_name: String,
  pub last_name:  String,
  pub email:      String,
  pub role:       String,
  pub active:     bool,
  pub created_at: String,
  pub updated_at: String,
}

impl RawMember {
  /// Column list matching [`RawMember::from_row`].
  pub const COLUMNS: &'static str = "member_id, first_name, last_name, \
     email, role, active, created_at, updated_at";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      member_id:  row.get(0)?,
      first_name: row.get(1)?,
      last_name:  row.get(2)?,
      email:      row.get(3)?,
      role:       row.get(4)?,
      active:     row.get(5)?,
      created_at: row.get(6)?,
      updated_at: row.get(7)?,
    })
  }

  pub fn into_member(self) -> Result<TeamMember> {
    Ok(TeamMember {
      member_id:  decode_uuid(&self.member_id)?,
      first_name: self.first_name,
      last_name:  self.last_name,
      email:      self.email,
      role:       decode_role(&self.role)?,
      active:     self.active,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}
