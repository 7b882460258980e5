//! The `VolunteerStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `flock-store-sqlite`).
//! Higher layers (`flock-api`, `flock-roster`) depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
  interaction::{
    Interaction, InteractionQuery, InteractionUpdate, NewInteraction,
  },
  member::{NewTeamMember, TeamMember},
  stats::{
    CheckinCandidate, DashboardOverview, EngagementMetrics, MemberStats,
    TeamActivityRow, TrendPoint,
  },
  volunteer::{
    NewVolunteer, RosterPerson, UpsertOutcome, Volunteer, VolunteerUpdate,
  },
};

/// Abstraction over a Flock storage backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
///
/// Dashboard reads take the evaluation date as a parameter rather than
/// reading the clock, so callers and tests control "today".
pub trait VolunteerStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Volunteers ────────────────────────────────────────────────────────

  /// Create a volunteer by hand. The roster id stays unset until a sync
  /// claims the record.
  fn add_volunteer(
    &self,
    input: NewVolunteer,
  ) -> impl Future<Output = Result<Volunteer, Self::Error>> + Send + '_;

  /// Retrieve a volunteer by id. Returns `None` if not found.
  fn get_volunteer(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Volunteer>, Self::Error>> + Send + '_;

  /// Look a volunteer up by its external roster id.
  fn find_by_roster_id<'a>(
    &'a self,
    roster_id: &'a str,
  ) -> impl Future<Output = Result<Option<Volunteer>, Self::Error>> + Send + 'a;

  /// List all volunteers, ordered by last then first name.
  fn list_volunteers(
    &self,
  ) -> impl Future<Output = Result<Vec<Volunteer>, Self::Error>> + Send + '_;

  /// Apply a partial manual edit. Errors if the volunteer does not exist.
  fn update_volunteer(
    &self,
    id: Uuid,
    update: VolunteerUpdate,
  ) -> impl Future<Output = Result<Volunteer, Self::Error>> + Send + '_;

  /// Delete a volunteer and, by cascade, all of its interactions.
  fn delete_volunteer(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Create-or-update keyed by roster id. Overwrites name, email, phone and
  /// address from the remote record and stamps `last_synced_at`; local
  /// `notes` and the cached `teams` are left untouched.
  fn upsert_synced(
    &self,
    person: RosterPerson,
  ) -> impl Future<Output = Result<UpsertOutcome, Self::Error>> + Send + '_;

  /// Replace the cached team-name list for one volunteer.
  fn set_teams(
    &self,
    id: Uuid,
    teams: Vec<String>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Interactions ──────────────────────────────────────────────────────

  /// Validate and persist a new interaction. Timestamps are set by the
  /// store.
  fn record_interaction(
    &self,
    input: NewInteraction,
  ) -> impl Future<Output = Result<Interaction, Self::Error>> + Send + '_;

  fn get_interaction(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Interaction>, Self::Error>> + Send + '_;

  /// List interactions matching `query`, newest interaction date first.
  fn list_interactions(
    &self,
    query: InteractionQuery,
  ) -> impl Future<Output = Result<Vec<Interaction>, Self::Error>> + Send + '_;

  /// Apply a partial edit; the follow-up invariant is re-checked against
  /// the merged record.
  fn update_interaction(
    &self,
    id: Uuid,
    update: InteractionUpdate,
  ) -> impl Future<Output = Result<Interaction, Self::Error>> + Send + '_;

  fn delete_interaction(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Mark a follow-up as completed on the given date.
  fn complete_followup(
    &self,
    id: Uuid,
    on: NaiveDate,
  ) -> impl Future<Output = Result<Interaction, Self::Error>> + Send + '_;

  // ── Team members ──────────────────────────────────────────────────────

  fn add_team_member(
    &self,
    input: NewTeamMember,
  ) -> impl Future<Output = Result<TeamMember, Self::Error>> + Send + '_;

  fn get_team_member(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<TeamMember>, Self::Error>> + Send + '_;

  fn list_team_members(
    &self,
  ) -> impl Future<Output = Result<Vec<TeamMember>, Self::Error>> + Send + '_;

  /// Delete a team member. Their interactions survive with the author
  /// reference cleared.
  fn delete_team_member(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Dashboard reads ───────────────────────────────────────────────────

  fn overview(
    &self,
    today: NaiveDate,
  ) -> impl Future<Output = Result<DashboardOverview, Self::Error>> + Send + '_;

  /// Month-bucketed interaction counts for dates on or after `since`.
  fn interaction_trends(
    &self,
    since: NaiveDate,
  ) -> impl Future<Output = Result<Vec<TrendPoint>, Self::Error>> + Send + '_;

  fn team_activity(
    &self,
    today: NaiveDate,
  ) -> impl Future<Output = Result<Vec<TeamActivityRow>, Self::Error>> + Send + '_;

  fn volunteers_needing_checkin(
    &self,
    today: NaiveDate,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<CheckinCandidate>, Self::Error>> + Send + '_;

  fn engagement_metrics(
    &self,
    today: NaiveDate,
  ) -> impl Future<Output = Result<EngagementMetrics, Self::Error>> + Send + '_;

  fn member_stats(
    &self,
    member_id: Uuid,
    today: NaiveDate,
  ) -> impl Future<Output = Result<MemberStats, Self::Error>> + Send + '_;

  /// Most recently created interactions, newest first.
  fn recent_interactions(
    &self,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<Interaction>, Self::Error>> + Send + '_;

  /// Open follow-ups due between `today` and `today + days`, soonest first.
  fn upcoming_followups(
    &self,
    today: NaiveDate,
    days: u32,
  ) -> impl Future<Output = Result<Vec<Interaction>, Self::Error>> + Send + '_;
}
