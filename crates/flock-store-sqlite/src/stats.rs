//! Dashboard aggregation queries.
//!
//! Each function runs a grouped/counting query against an open connection and
//! returns either a finished value (plain counts) or a raw row for the store
//! to decode. All date parameters arrive pre-encoded as `YYYY-MM-DD` text,
//! which compares correctly in SQL.

use flock_core::stats::{DashboardOverview, TrendPoint};

fn count(conn: &rusqlite::Connection, sql: &str) -> rusqlite::Result<u64> {
  let n: i64 = conn.query_row(sql, [], |r| r.get(0))?;
  Ok(n as u64)
}

fn count_with(
  conn: &rusqlite::Connection,
  sql: &str,
  params: &[&dyn rusqlite::ToSql],
) -> rusqlite::Result<u64> {
  let n: i64 = conn.query_row(sql, params, |r| r.get(0))?;
  Ok(n as u64)
}

// ─── Overview ────────────────────────────────────────────────────────────────

pub fn overview(
  conn: &rusqlite::Connection,
  today: &str,
  month_cutoff: &str,
) -> rusqlite::Result<DashboardOverview> {
  Ok(DashboardOverview {
    total_volunteers: count(conn, "SELECT COUNT(*) FROM volunteers")?,
    total_interactions: count(conn, "SELECT COUNT(*) FROM interactions")?,
    interactions_this_month: count_with(
      conn,
      "SELECT COUNT(*) FROM interactions WHERE interaction_date >= ?1",
      &[&month_cutoff],
    )?,
    pending_followups: count(
      conn,
      "SELECT COUNT(*) FROM interactions
       WHERE needs_followup = 1 AND followup_completed = 0",
    )?,
    overdue_followups: count_with(
      conn,
      "SELECT COUNT(*) FROM interactions
       WHERE needs_followup = 1 AND followup_completed = 0
         AND followup_date < ?1",
      &[&today],
    )?,
    active_team_members: count(
      conn,
      "SELECT COUNT(*) FROM team_members WHERE active = 1",
    )?,
  })
}

// ─── Trends ──────────────────────────────────────────────────────────────────

pub fn interaction_trends(
  conn: &rusqlite::Connection,
  since: &str,
) -> rusqlite::Result<Vec<TrendPoint>> {
  let mut stmt = conn.prepare(
    "SELECT substr(interaction_date, 1, 7) AS month, COUNT(*)
     FROM interactions
     WHERE interaction_date >= ?1
     GROUP BY month
     ORDER BY month",
  )?;

  let rows = stmt
    .query_map(rusqlite::params![since], |row| {
      Ok(TrendPoint {
        month:             row.get(0)?,
        interaction_count: row.get::<_, i64>(1)? as u64,
      })
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  Ok(rows)
}

// ─── Team activity ───────────────────────────────────────────────────────────

pub struct RawTeamActivity {
  pub member_id:  String,
  pub first_name: String,
  pub last_name:  String,
  pub total:      i64,
  pub this_month: i64,
  pub last_date:  Option<String>,
}

pub fn team_activity(
  conn: &rusqlite::Connection,
  month_cutoff: &str,
) -> rusqlite::Result<Vec<RawTeamActivity>> {
  let mut stmt = conn.prepare(
    "SELECT m.member_id, m.first_name, m.last_name,
            COUNT(i.interaction_id),
            COALESCE(SUM(CASE WHEN i.interaction_date >= ?1 THEN 1 ELSE 0 END), 0),
            MAX(i.interaction_date)
     FROM team_members m
     LEFT JOIN interactions i ON i.member_id = m.member_id
     WHERE m.active = 1
     GROUP BY m.member_id, m.first_name, m.last_name
     ORDER BY COUNT(i.interaction_id) DESC, m.last_name, m.first_name",
  )?;

  let rows = stmt
    .query_map(rusqlite::params![month_cutoff], |row| {
      Ok(RawTeamActivity {
        member_id:  row.get(0)?,
        first_name: row.get(1)?,
        last_name:  row.get(2)?,
        total:      row.get(3)?,
        this_month: row.get(4)?,
        last_date:  row.get(5)?,
      })
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  Ok(rows)
}

// ─── Check-in candidates ─────────────────────────────────────────────────────

pub struct RawCheckin {
  pub volunteer_id: String,
  pub first_name:   String,
  pub last_name:    String,
  pub email:        Option<String>,
  pub phone:        Option<String>,
  pub last_date:    Option<String>,
  pub total:        i64,
}

pub fn volunteers_needing_checkin(
  conn: &rusqlite::Connection,
  cutoff: &str,
  limit: i64,
) -> rusqlite::Result<Vec<RawCheckin>> {
  // Never-contacted volunteers sort first, then oldest contact first.
  let mut stmt = conn.prepare(
    "SELECT v.volunteer_id, v.first_name, v.last_name, v.email, v.phone,
            MAX(i.interaction_date) AS last_date,
            COUNT(i.interaction_id)
     FROM volunteers v
     LEFT JOIN interactions i ON i.volunteer_id = v.volunteer_id
     GROUP BY v.volunteer_id, v.first_name, v.last_name, v.email, v.phone
     HAVING last_date IS NULL OR last_date < ?1
     ORDER BY last_date IS NOT NULL, last_date ASC
     LIMIT ?2",
  )?;

  let rows = stmt
    .query_map(rusqlite::params![cutoff, limit], |row| {
      Ok(RawCheckin {
        volunteer_id: row.get(0)?,
        first_name:   row.get(1)?,
        last_name:    row.get(2)?,
        email:        row.get(3)?,
        phone:        row.get(4)?,
        last_date:    row.get(5)?,
        total:        row.get(6)?,
      })
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  Ok(rows)
}

// ─── Engagement tiers ────────────────────────────────────────────────────────

pub struct RawEngagement {
  pub never_contacted:    i64,
  pub at_risk:            i64,
  pub moderately_engaged: i64,
  pub highly_engaged:     i64,
  pub total_volunteers:   i64,
  pub total_interactions: i64,
}

pub fn engagement(
  conn: &rusqlite::Connection,
  cutoff_60: &str,
  cutoff_30: &str,
) -> rusqlite::Result<RawEngagement> {
  let (never, at_risk, moderate, high, total_v): (i64, i64, i64, i64, i64) =
    conn.query_row(
      "SELECT
         COALESCE(SUM(CASE WHEN cnt = 0 THEN 1 ELSE 0 END), 0),
         COALESCE(SUM(CASE WHEN cnt > 0 AND last < ?1 THEN 1 ELSE 0 END), 0),
         COALESCE(SUM(CASE WHEN last >= ?1 AND last < ?2 THEN 1 ELSE 0 END), 0),
         COALESCE(SUM(CASE WHEN last >= ?2 THEN 1 ELSE 0 END), 0),
         COUNT(*)
       FROM (
         SELECT COUNT(i.interaction_id) AS cnt,
                MAX(i.interaction_date) AS last
         FROM volunteers v
         LEFT JOIN interactions i ON i.volunteer_id = v.volunteer_id
         GROUP BY v.volunteer_id
       )",
      rusqlite::params![cutoff_60, cutoff_30],
      |row| {
        Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
      },
    )?;

  let total_i: i64 =
    conn.query_row("SELECT COUNT(*) FROM interactions", [], |r| r.get(0))?;

  Ok(RawEngagement {
    never_contacted:    never,
    at_risk,
    moderately_engaged: moderate,
    highly_engaged:     high,
    total_volunteers:   total_v,
    total_interactions: total_i,
  })
}

// ─── Per-member stats ────────────────────────────────────────────────────────

pub struct RawMemberStats {
  pub total:                i64,
  pub this_month:           i64,
  pub this_week:            i64,
  pub pending_followups:    i64,
  pub volunteers_contacted: i64,
  pub last_date:            Option<String>,
}

pub fn member_stats(
  conn: &rusqlite::Connection,
  member_id: &str,
  month_cutoff: &str,
  week_cutoff: &str,
) -> rusqlite::Result<RawMemberStats> {
  conn.query_row(
    "SELECT
       COUNT(*),
       COALESCE(SUM(CASE WHEN interaction_date >= ?2 THEN 1 ELSE 0 END), 0),
       COALESCE(SUM(CASE WHEN interaction_date >= ?3 THEN 1 ELSE 0 END), 0),
       COALESCE(SUM(CASE WHEN needs_followup = 1 AND followup_completed = 0
                         THEN 1 ELSE 0 END), 0),
       COUNT(DISTINCT volunteer_id),
       MAX(interaction_date)
     FROM interactions
     WHERE member_id = ?1",
    rusqlite::params![member_id, month_cutoff, week_cutoff],
    |row| {
      Ok(RawMemberStats {
        total:                row.get(0)?,
        this_month:           row.get(1)?,
        this_week:            row.get(2)?,
        pending_followups:    row.get(3)?,
        volunteers_contacted: row.get(4)?,
        last_date:            row.get(5)?,
      })
    },
  )
}
