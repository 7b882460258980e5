//! Handlers for `/dashboard` endpoints.
//!
//! All reads are evaluated against the server's current date; the store
//! itself never touches the clock.

use axum::{
  Json,
  extract::{Query, State},
};
use chrono::{Months, NaiveDate, Utc};
use flock_core::{
  interaction::Interaction,
  stats::{
    CheckinCandidate, DashboardOverview, EngagementMetrics, TeamActivityRow,
    TrendPoint,
  },
  store::VolunteerStore,
};
use flock_roster::RosterSource;
use serde::Deserialize;

use crate::{AppState, error::ApiError};

fn today() -> NaiveDate { Utc::now().date_naive() }

/// `GET /dashboard`
pub async fn overview<S, R>(
  State(state): State<AppState<S, R>>,
) -> Result<Json<DashboardOverview>, ApiError>
where
  S: VolunteerStore,
  R: RosterSource,
{
  let overview =
    state.store.overview(today()).await.map_err(ApiError::store)?;
  Ok(Json(overview))
}

// ─── Trends ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TrendParams {
  pub months: Option<u32>,
}

/// `GET /dashboard/trends[?months=<n>]` — defaults to the last 12 months.
pub async fn trends<S, R>(
  State(state): State<AppState<S, R>>,
  Query(params): Query<TrendParams>,
) -> Result<Json<Vec<TrendPoint>>, ApiError>
where
  S: VolunteerStore,
  R: RosterSource,
{
  let months = params.months.unwrap_or(12);
  let since = today()
    .checked_sub_months(Months::new(months))
    .unwrap_or(NaiveDate::MIN);
  let points = state
    .store
    .interaction_trends(since)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(points))
}

// ─── Team activity ────────────────────────────────────────────────────────────

/// `GET /dashboard/team-activity`
pub async fn team_activity<S, R>(
  State(state): State<AppState<S, R>>,
) -> Result<Json<Vec<TeamActivityRow>>, ApiError>
where
  S: VolunteerStore,
  R: RosterSource,
{
  let rows =
    state.store.team_activity(today()).await.map_err(ApiError::store)?;
  Ok(Json(rows))
}

// ─── Check-ins ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CheckinParams {
  pub limit: Option<usize>,
}

/// `GET /dashboard/checkins[?limit=<n>]` — volunteers longest without
/// contact first; never-contacted volunteers lead.
pub async fn checkins<S, R>(
  State(state): State<AppState<S, R>>,
  Query(params): Query<CheckinParams>,
) -> Result<Json<Vec<CheckinCandidate>>, ApiError>
where
  S: VolunteerStore,
  R: RosterSource,
{
  let candidates = state
    .store
    .volunteers_needing_checkin(today(), params.limit.unwrap_or(10))
    .await
    .map_err(ApiError::store)?;
  Ok(Json(candidates))
}

// ─── Engagement ───────────────────────────────────────────────────────────────

/// `GET /dashboard/engagement`
pub async fn engagement<S, R>(
  State(state): State<AppState<S, R>>,
) -> Result<Json<EngagementMetrics>, ApiError>
where
  S: VolunteerStore,
  R: RosterSource,
{
  let metrics = state
    .store
    .engagement_metrics(today())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(metrics))
}

// ─── Activity feeds ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RecentParams {
  pub limit: Option<usize>,
}

/// `GET /dashboard/recent[?limit=<n>]` — most recently recorded
/// interactions, newest first.
pub async fn recent<S, R>(
  State(state): State<AppState<S, R>>,
  Query(params): Query<RecentParams>,
) -> Result<Json<Vec<Interaction>>, ApiError>
where
  S: VolunteerStore,
  R: RosterSource,
{
  let interactions = state
    .store
    .recent_interactions(params.limit.unwrap_or(10))
    .await
    .map_err(ApiError::store)?;
  Ok(Json(interactions))
}

#[derive(Debug, Deserialize)]
pub struct FollowupParams {
  pub days: Option<u32>,
}

/// `GET /dashboard/followups[?days=<n>]` — open follow-ups due within the
/// next `days` days (default 7), soonest first.
pub async fn followups<S, R>(
  State(state): State<AppState<S, R>>,
  Query(params): Query<FollowupParams>,
) -> Result<Json<Vec<Interaction>>, ApiError>
where
  S: VolunteerStore,
  R: RosterSource,
{
  let interactions = state
    .store
    .upcoming_followups(today(), params.days.unwrap_or(7))
    .await
    .map_err(ApiError::store)?;
  Ok(Json(interactions))
}
