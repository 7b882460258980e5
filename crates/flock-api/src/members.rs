//! Handlers for `/members` endpoints.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::Utc;
use flock_core::{
  member::{NewTeamMember, TeamMember},
  stats::MemberStats,
  store::VolunteerStore,
};
use flock_roster::RosterSource;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

async fn require_member<S>(store: &S, id: Uuid) -> Result<TeamMember, ApiError>
where
  S: VolunteerStore,
{
  store
    .get_team_member(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("team member {id} not found")))
}

/// `GET /members`
pub async fn list<S, R>(
  State(state): State<AppState<S, R>>,
) -> Result<Json<Vec<TeamMember>>, ApiError>
where
  S: VolunteerStore,
  R: RosterSource,
{
  let members =
    state.store.list_team_members().await.map_err(ApiError::store)?;
  Ok(Json(members))
}

/// `POST /members`
pub async fn create<S, R>(
  State(state): State<AppState<S, R>>,
  Json(body): Json<NewTeamMember>,
) -> Result<impl IntoResponse, ApiError>
where
  S: VolunteerStore,
  R: RosterSource,
{
  let member =
    state.store.add_team_member(body).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(member)))
}

/// `GET /members/:id`
pub async fn get_one<S, R>(
  State(state): State<AppState<S, R>>,
  Path(id): Path<Uuid>,
) -> Result<Json<TeamMember>, ApiError>
where
  S: VolunteerStore,
  R: RosterSource,
{
  Ok(Json(require_member(&*state.store, id).await?))
}

/// `DELETE /members/:id` — interactions they authored survive with the
/// author reference cleared.
pub async fn delete<S, R>(
  State(state): State<AppState<S, R>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: VolunteerStore,
  R: RosterSource,
{
  require_member(&*state.store, id).await?;
  state
    .store
    .delete_team_member(id)
    .await
    .map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}

/// `GET /members/:id/stats`
pub async fn stats<S, R>(
  State(state): State<AppState<S, R>>,
  Path(id): Path<Uuid>,
) -> Result<Json<MemberStats>, ApiError>
where
  S: VolunteerStore,
  R: RosterSource,
{
  require_member(&*state.store, id).await?;
  let stats = state
    .store
    .member_stats(id, Utc::now().date_naive())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(stats))
}
