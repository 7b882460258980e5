//! [`SqliteStore`] — the SQLite implementation of [`VolunteerStore`].

use std::path::Path;

use chrono::{Days, NaiveDate, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use flock_core::{
  interaction::{
    Interaction, InteractionQuery, InteractionUpdate, NewInteraction,
  },
  member::{NewTeamMember, TeamMember},
  stats::{
    CheckinCandidate, DashboardOverview, EngagementMetrics, MemberStats,
    TeamActivityRow, TrendPoint,
  },
  store::VolunteerStore,
  volunteer::{
    NewVolunteer, RosterPerson, UpsertOutcome, Volunteer, VolunteerUpdate,
  },
};

use crate::{
  Error, Result,
  encode::{
    RawInteraction, RawMember, RawVolunteer, decode_date, decode_uuid,
    encode_date, encode_dt, encode_role, encode_strings, encode_uuid,
  },
  schema::SCHEMA,
  stats,
};

/// Clamp-safe date arithmetic for dashboard cutoffs.
fn days_before(d: NaiveDate, n: u64) -> NaiveDate {
  d.checked_sub_days(Days::new(n)).unwrap_or(NaiveDate::MIN)
}

fn days_after(d: NaiveDate, n: u64) -> NaiveDate {
  d.checked_add_days(Days::new(n)).unwrap_or(NaiveDate::MAX)
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Flock store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Row helpers ───────────────────────────────────────────────────────────

  async fn volunteer_where(
    &self,
    condition: &'static str,
    param: String,
  ) -> Result<Option<Volunteer>> {
    let raw: Option<RawVolunteer> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {} FROM volunteers WHERE {condition}",
          RawVolunteer::COLUMNS
        );
        Ok(
          conn
            .query_row(&sql, rusqlite::params![param], RawVolunteer::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawVolunteer::into_volunteer).transpose()
  }

  /// Insert a fully-built [`Volunteer`] row.
  async fn insert_volunteer(&self, v: &Volunteer) -> Result<()> {
    let id_str     = encode_uuid(v.volunteer_id);
    let roster_id  = v.roster_id.clone();
    let first_name = v.first_name.clone();
    let last_name  = v.last_name.clone();
    let email      = v.email.clone();
    let phone      = v.phone.clone();
    let address    = v.address.clone();
    let notes      = v.notes.clone();
    let teams_str  = encode_strings(&v.teams)?;
    let synced_str = v.last_synced_at.map(encode_dt);
    let created    = encode_dt(v.created_at);
    let updated    = encode_dt(v.updated_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO volunteers (
             volunteer_id, roster_id, first_name, last_name, email, phone,
             address, notes, teams, last_synced_at, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
          rusqlite::params![
            id_str, roster_id, first_name, last_name, email, phone, address,
            notes, teams_str, synced_str, created, updated,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Overwrite every mutable column of an existing volunteer row.
  async fn write_volunteer(&self, v: &Volunteer) -> Result<()> {
    let id_str     = encode_uuid(v.volunteer_id);
    let roster_id  = v.roster_id.clone();
    let first_name = v.first_name.clone();
    let last_name  = v.last_name.clone();
    let email      = v.email.clone();
    let phone      = v.phone.clone();
    let address    = v.address.clone();
    let notes      = v.notes.clone();
    let teams_str  = encode_strings(&v.teams)?;
    let synced_str = v.last_synced_at.map(encode_dt);
    let updated    = encode_dt(v.updated_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE volunteers SET
             roster_id = ?2, first_name = ?3, last_name = ?4, email = ?5,
             phone = ?6, address = ?7, notes = ?8, teams = ?9,
             last_synced_at = ?10, updated_at = ?11
           WHERE volunteer_id = ?1",
          rusqlite::params![
            id_str, roster_id, first_name, last_name, email, phone, address,
            notes, teams_str, synced_str, updated,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Overwrite every mutable column of an existing interaction row.
  async fn write_interaction(&self, i: &Interaction) -> Result<()> {
    let id_str        = encode_uuid(i.interaction_id);
    let member_str    = i.member_id.map(encode_uuid);
    let date_str      = encode_date(i.interaction_date);
    let notes         = i.discussion_notes.clone();
    let topics_str    = encode_strings(&i.topics)?;
    let needs         = i.needs_followup;
    let fu_date       = i.followup_date.map(encode_date);
    let fu_notes      = i.followup_notes.clone();
    let fu_done       = i.followup_completed;
    let fu_done_date  = i.followup_completed_date.map(encode_date);
    let updated       = encode_dt(i.updated_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE interactions SET
             member_id = ?2, interaction_date = ?3, discussion_notes = ?4,
             topics = ?5, needs_followup = ?6, followup_date = ?7,
             followup_notes = ?8, followup_completed = ?9,
             followup_completed_date = ?10, updated_at = ?11
           WHERE interaction_id = ?1",
          rusqlite::params![
            id_str, member_str, date_str, notes, topics_str, needs, fu_date,
            fu_notes, fu_done, fu_done_date, updated,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn interactions_where(
    &self,
    condition: String,
    params: Vec<String>,
    order_and_limit: String,
  ) -> Result<Vec<Interaction>> {
    let raws: Vec<RawInteraction> = self
      .conn
      .call(move |conn| {
        let where_clause = if condition.is_empty() {
          String::new()
        } else {
          format!("WHERE {condition}")
        };
        let sql = format!(
          "SELECT {} FROM interactions {where_clause} {order_and_limit}",
          RawInteraction::COLUMNS
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(
            rusqlite::params_from_iter(params.iter()),
            RawInteraction::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawInteraction::into_interaction).collect()
  }
}

// ─── VolunteerStore impl ─────────────────────────────────────────────────────

impl VolunteerStore for SqliteStore {
  type Error = Error;

  // ── Volunteers ────────────────────────────────────────────────────────────

  async fn add_volunteer(&self, input: NewVolunteer) -> Result<Volunteer> {
    let now = Utc::now();
    let volunteer = Volunteer {
      volunteer_id: Uuid::new_v4(),
      roster_id: None,
      first_name: input.first_name,
      last_name: input.last_name,
      email: input.email,
      phone: input.phone,
      address: input.address,
      notes: input.notes,
      teams: Vec::new(),
      last_synced_at: None,
      created_at: now,
      updated_at: now,
    };

    self.insert_volunteer(&volunteer).await?;
    Ok(volunteer)
  }

  async fn get_volunteer(&self, id: Uuid) -> Result<Option<Volunteer>> {
    self
      .volunteer_where("volunteer_id = ?1", encode_uuid(id))
      .await
  }

  async fn find_by_roster_id(
    &self,
    roster_id: &str,
  ) -> Result<Option<Volunteer>> {
    self
      .volunteer_where("roster_id = ?1", roster_id.to_owned())
      .await
  }

  async fn list_volunteers(&self) -> Result<Vec<Volunteer>> {
    let raws: Vec<RawVolunteer> = self
      .conn
      .call(|conn| {
        let sql = format!(
          "SELECT {} FROM volunteers ORDER BY last_name, first_name",
          RawVolunteer::COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], RawVolunteer::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawVolunteer::into_volunteer).collect()
  }

  async fn update_volunteer(
    &self,
    id: Uuid,
    update: VolunteerUpdate,
  ) -> Result<Volunteer> {
    let mut volunteer = self
      .get_volunteer(id)
      .await?
      .ok_or(Error::VolunteerNotFound(id))?;

    if let Some(v) = update.first_name {
      volunteer.first_name = v;
    }
    if let Some(v) = update.last_name {
      volunteer.last_name = v;
    }
    if let Some(v) = update.email {
      volunteer.email = Some(v);
    }
    if let Some(v) = update.phone {
      volunteer.phone = Some(v);
    }
    if let Some(v) = update.address {
      volunteer.address = Some(v);
    }
    if let Some(v) = update.notes {
      volunteer.notes = Some(v);
    }
    volunteer.updated_at = Utc::now();

    self.write_volunteer(&volunteer).await?;
    Ok(volunteer)
  }

  async fn delete_volunteer(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);
    let affected = self
      .conn
      .call(move |conn| {
        // Interactions go with the volunteer via ON DELETE CASCADE.
        Ok(conn.execute(
          "DELETE FROM volunteers WHERE volunteer_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    if affected == 0 {
      return Err(Error::VolunteerNotFound(id));
    }
    Ok(())
  }

  // Deliberately leaves `teams` alone: bulk sync payloads carry no team
  // data, so overwriting here could only clear the cached list. Teams
  // change through `set_teams` after an explicit roster team fetch.
  async fn upsert_synced(&self, person: RosterPerson) -> Result<UpsertOutcome> {
    let now = Utc::now();

    match self.find_by_roster_id(&person.roster_id).await? {
      Some(mut existing) => {
        // Last write wins from the remote source; notes and the cached
        // team list stay local.
        existing.first_name = person.first_name;
        existing.last_name = person.last_name;
        existing.email = person.email;
        existing.phone = person.phone;
        existing.address = person.address;
        existing.last_synced_at = Some(now);
        existing.updated_at = now;

        self.write_volunteer(&existing).await?;
        Ok(UpsertOutcome::Updated(existing))
      }
      None => {
        let volunteer = Volunteer {
          volunteer_id: Uuid::new_v4(),
          roster_id: Some(person.roster_id),
          first_name: person.first_name,
          last_name: person.last_name,
          email: person.email,
          phone: person.phone,
          address: person.address,
          notes: None,
          teams: Vec::new(),
          last_synced_at: Some(now),
          created_at: now,
          updated_at: now,
        };

        self.insert_volunteer(&volunteer).await?;
        Ok(UpsertOutcome::Created(volunteer))
      }
    }
  }

  async fn set_teams(&self, id: Uuid, teams: Vec<String>) -> Result<()> {
    let id_str    = encode_uuid(id);
    let teams_str = encode_strings(&teams)?;
    let updated   = encode_dt(Utc::now());

    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE volunteers SET teams = ?2, updated_at = ?3
           WHERE volunteer_id = ?1",
          rusqlite::params![id_str, teams_str, updated],
        )?)
      })
      .await?;

    if affected == 0 {
      return Err(Error::VolunteerNotFound(id));
    }
    Ok(())
  }

  // ── Interactions ──────────────────────────────────────────────────────────

  async fn record_interaction(
    &self,
    input: NewInteraction,
  ) -> Result<Interaction> {
    input.validate()?;

    if self.get_volunteer(input.volunteer_id).await?.is_none() {
      return Err(Error::VolunteerNotFound(input.volunteer_id));
    }

    let now = Utc::now();
    let interaction = Interaction {
      interaction_id: Uuid::new_v4(),
      volunteer_id: input.volunteer_id,
      member_id: input.member_id,
      interaction_date: input.interaction_date,
      discussion_notes: input.discussion_notes,
      topics: input.topics,
      needs_followup: input.needs_followup,
      followup_date: input.followup_date,
      followup_notes: input.followup_notes,
      followup_completed: false,
      followup_completed_date: None,
      created_at: now,
      updated_at: now,
    };

    let id_str       = encode_uuid(interaction.interaction_id);
    let vol_str      = encode_uuid(interaction.volunteer_id);
    let member_str   = interaction.member_id.map(encode_uuid);
    let date_str     = encode_date(interaction.interaction_date);
    let notes        = interaction.discussion_notes.clone();
    let topics_str   = encode_strings(&interaction.topics)?;
    let needs        = interaction.needs_followup;
    let fu_date      = interaction.followup_date.map(encode_date);
    let fu_notes     = interaction.followup_notes.clone();
    let created      = encode_dt(now);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO interactions (
             interaction_id, volunteer_id, member_id, interaction_date,
             discussion_notes, topics, needs_followup, followup_date,
             followup_notes, followup_completed, followup_completed_date,
             created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 0, NULL, ?10, ?10)",
          rusqlite::params![
            id_str, vol_str, member_str, date_str, notes, topics_str, needs,
            fu_date, fu_notes, created,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(interaction)
  }

  async fn get_interaction(&self, id: Uuid) -> Result<Option<Interaction>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawInteraction> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {} FROM interactions WHERE interaction_id = ?1",
          RawInteraction::COLUMNS
        );
        Ok(
          conn
            .query_row(&sql, rusqlite::params![id_str], RawInteraction::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawInteraction::into_interaction).transpose()
  }

  async fn list_interactions(
    &self,
    query: InteractionQuery,
  ) -> Result<Vec<Interaction>> {
    let mut conds: Vec<String> = vec![];
    let mut params: Vec<String> = vec![];

    if let Some(vid) = query.volunteer_id {
      params.push(encode_uuid(vid));
      conds.push(format!("volunteer_id = ?{}", params.len()));
    }
    if let Some(mid) = query.member_id {
      params.push(encode_uuid(mid));
      conds.push(format!("member_id = ?{}", params.len()));
    }
    if query.pending || query.overdue_on.is_some() {
      conds.push("needs_followup = 1 AND followup_completed = 0".to_owned());
    }
    if let Some(today) = query.overdue_on {
      params.push(encode_date(today));
      conds.push(format!("followup_date < ?{}", params.len()));
    }

    self
      .interactions_where(
        conds.join(" AND "),
        params,
        "ORDER BY interaction_date DESC, created_at DESC".to_owned(),
      )
      .await
  }

  async fn update_interaction(
    &self,
    id: Uuid,
    update: InteractionUpdate,
  ) -> Result<Interaction> {
    let mut interaction = self
      .get_interaction(id)
      .await?
      .ok_or(Error::InteractionNotFound(id))?;

    if let Some(v) = update.interaction_date {
      interaction.interaction_date = v;
    }
    if let Some(v) = update.discussion_notes {
      interaction.discussion_notes = v;
    }
    if let Some(v) = update.topics {
      interaction.topics = v;
    }
    if let Some(v) = update.needs_followup {
      interaction.needs_followup = v;
    }
    if let Some(v) = update.followup_date {
      interaction.followup_date = Some(v);
    }
    if let Some(v) = update.followup_notes {
      interaction.followup_notes = Some(v);
    }

    if interaction.needs_followup && interaction.followup_date.is_none() {
      return Err(Error::Core(flock_core::Error::MissingField {
        field: "followup_date",
      }));
    }

    interaction.updated_at = Utc::now();
    self.write_interaction(&interaction).await?;
    Ok(interaction)
  }

  async fn delete_interaction(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);
    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM interactions WHERE interaction_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    if affected == 0 {
      return Err(Error::InteractionNotFound(id));
    }
    Ok(())
  }

  async fn complete_followup(
    &self,
    id: Uuid,
    on: NaiveDate,
  ) -> Result<Interaction> {
    let mut interaction = self
      .get_interaction(id)
      .await?
      .ok_or(Error::InteractionNotFound(id))?;

    interaction.followup_completed = true;
    interaction.followup_completed_date = Some(on);
    interaction.updated_at = Utc::now();

    self.write_interaction(&interaction).await?;
    Ok(interaction)
  }

  // ── Team members ──────────────────────────────────────────────────────────

  async fn add_team_member(&self, input: NewTeamMember) -> Result<TeamMember> {
    let now = Utc::now();
    let member = TeamMember {
      member_id: Uuid::new_v4(),
      first_name: input.first_name,
      last_name: input.last_name,
      email: input.email,
      role: input.role,
      active: true,
      created_at: now,
      updated_at: now,
    };

    let id_str     = encode_uuid(member.member_id);
    let first_name = member.first_name.clone();
    let last_name  = member.last_name.clone();
    let email      = member.email.clone();
    let role_str   = encode_role(member.role).to_owned();
    let created    = encode_dt(now);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO team_members (
             member_id, first_name, last_name, email, role, active,
             created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6, ?6)",
          rusqlite::params![id_str, first_name, last_name, email, role_str, created],
        )?;
        Ok(())
      })
      .await?;

    Ok(member)
  }

  async fn get_team_member(&self, id: Uuid) -> Result<Option<TeamMember>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawMember> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {} FROM team_members WHERE member_id = ?1",
          RawMember::COLUMNS
        );
        Ok(
          conn
            .query_row(&sql, rusqlite::params![id_str], RawMember::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawMember::into_member).transpose()
  }

  async fn list_team_members(&self) -> Result<Vec<TeamMember>> {
    let raws: Vec<RawMember> = self
      .conn
      .call(|conn| {
        let sql = format!(
          "SELECT {} FROM team_members ORDER BY last_name, first_name",
          RawMember::COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], RawMember::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawMember::into_member).collect()
  }

  async fn delete_team_member(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);
    let affected = self
      .conn
      .call(move |conn| {
        // Authored interactions survive via ON DELETE SET NULL.
        Ok(conn.execute(
          "DELETE FROM team_members WHERE member_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    if affected == 0 {
      return Err(Error::MemberNotFound(id));
    }
    Ok(())
  }

  // ── Dashboard reads ───────────────────────────────────────────────────────

  async fn overview(&self, today: NaiveDate) -> Result<DashboardOverview> {
    let today_str = encode_date(today);
    let month_str = encode_date(days_before(today, 30));

    Ok(
      self
        .conn
        .call(move |conn| Ok(stats::overview(conn, &today_str, &month_str)?))
        .await?,
    )
  }

  async fn interaction_trends(
    &self,
    since: NaiveDate,
  ) -> Result<Vec<TrendPoint>> {
    let since_str = encode_date(since);

    Ok(
      self
        .conn
        .call(move |conn| Ok(stats::interaction_trends(conn, &since_str)?))
        .await?,
    )
  }

  async fn team_activity(
    &self,
    today: NaiveDate,
  ) -> Result<Vec<TeamActivityRow>> {
    let month_str = encode_date(days_before(today, 30));

    let raws = self
      .conn
      .call(move |conn| Ok(stats::team_activity(conn, &month_str)?))
      .await?;

    raws
      .into_iter()
      .map(|r| {
        Ok(TeamActivityRow {
          member_id:               decode_uuid(&r.member_id)?,
          first_name:              r.first_name,
          last_name:               r.last_name,
          total_interactions:      r.total as u64,
          interactions_this_month: r.this_month as u64,
          last_interaction_date:   r
            .last_date
            .as_deref()
            .map(decode_date)
            .transpose()?,
        })
      })
      .collect()
  }

  async fn volunteers_needing_checkin(
    &self,
    today: NaiveDate,
    limit: usize,
  ) -> Result<Vec<CheckinCandidate>> {
    let cutoff_str = encode_date(days_before(today, 30));
    let limit_val = limit as i64;

    let raws = self
      .conn
      .call(move |conn| {
        Ok(stats::volunteers_needing_checkin(conn, &cutoff_str, limit_val)?)
      })
      .await?;

    raws
      .into_iter()
      .map(|r| {
        Ok(CheckinCandidate {
          volunteer_id:          decode_uuid(&r.volunteer_id)?,
          first_name:            r.first_name,
          last_name:             r.last_name,
          email:                 r.email,
          phone:                 r.phone,
          last_interaction_date: r
            .last_date
            .as_deref()
            .map(decode_date)
            .transpose()?,
          total_interactions:    r.total as u64,
        })
      })
      .collect()
  }

  async fn engagement_metrics(
    &self,
    today: NaiveDate,
  ) -> Result<EngagementMetrics> {
    let cutoff_60 = encode_date(days_before(today, 60));
    let cutoff_30 = encode_date(days_before(today, 30));

    let raw = self
      .conn
      .call(move |conn| Ok(stats::engagement(conn, &cutoff_60, &cutoff_30)?))
      .await?;

    let avg = if raw.total_volunteers > 0 {
      let exact = raw.total_interactions as f64 / raw.total_volunteers as f64;
      (exact * 100.0).round() / 100.0
    } else {
      0.0
    };

    Ok(EngagementMetrics {
      never_contacted:                raw.never_contacted as u64,
      at_risk:                        raw.at_risk as u64,
      moderately_engaged:             raw.moderately_engaged as u64,
      highly_engaged:                 raw.highly_engaged as u64,
      avg_interactions_per_volunteer: avg,
    })
  }

  async fn member_stats(
    &self,
    member_id: Uuid,
    today: NaiveDate,
  ) -> Result<MemberStats> {
    if self.get_team_member(member_id).await?.is_none() {
      return Err(Error::MemberNotFound(member_id));
    }

    let id_str    = encode_uuid(member_id);
    let month_str = encode_date(days_before(today, 30));
    let week_str  = encode_date(days_before(today, 7));

    let raw = self
      .conn
      .call(move |conn| {
        Ok(stats::member_stats(conn, &id_str, &month_str, &week_str)?)
      })
      .await?;

    Ok(MemberStats {
      total_interactions:      raw.total as u64,
      interactions_this_month: raw.this_month as u64,
      interactions_this_week:  raw.this_week as u64,
      pending_followups:       raw.pending_followups as u64,
      volunteers_contacted:    raw.volunteers_contacted as u64,
      last_interaction_date:   raw
        .last_date
        .as_deref()
        .map(decode_date)
        .transpose()?,
    })
  }

  async fn recent_interactions(&self, limit: usize) -> Result<Vec<Interaction>> {
    self
      .interactions_where(
        String::new(),
        vec![],
        format!("ORDER BY created_at DESC LIMIT {}", limit as i64),
      )
      .await
  }

  async fn upcoming_followups(
    &self,
    today: NaiveDate,
    days: u32,
  ) -> Result<Vec<Interaction>> {
    let start = encode_date(today);
    let end = encode_date(days_after(today, u64::from(days)));

    self
      .interactions_where(
        "needs_followup = 1 AND followup_completed = 0 \
         AND followup_date >= ?1 AND followup_date <= ?2"
          .to_owned(),
        vec![start, end],
        "ORDER BY followup_date ASC".to_owned(),
      )
      .await
  }
}
