//! Handlers for `/volunteers` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/volunteers` | All volunteers, last name first |
//! | `POST`   | `/volunteers` | Manual creation |
//! | `GET`    | `/volunteers/:id` | 404 if not found |
//! | `PUT`    | `/volunteers/:id` | Partial update |
//! | `DELETE` | `/volunteers/:id` | Cascades to interactions |
//! | `GET`    | `/volunteers/:id/history` | Interactions, newest first |
//! | `POST`   | `/volunteers/:id/teams` | Refresh cached teams from roster |
//! | `POST`   | `/volunteers/:id/summary` | LLM summary of the history |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use flock_core::{
  interaction::{Interaction, InteractionQuery},
  store::VolunteerStore,
  volunteer::{NewVolunteer, Volunteer, VolunteerUpdate},
};
use flock_roster::RosterSource;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

async fn require_volunteer<S>(store: &S, id: Uuid) -> Result<Volunteer, ApiError>
where
  S: VolunteerStore,
{
  store
    .get_volunteer(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("volunteer {id} not found")))
}

// ─── CRUD ─────────────────────────────────────────────────────────────────────

/// `GET /volunteers`
pub async fn list<S, R>(
  State(state): State<AppState<S, R>>,
) -> Result<Json<Vec<Volunteer>>, ApiError>
where
  S: VolunteerStore,
  R: RosterSource,
{
  let volunteers =
    state.store.list_volunteers().await.map_err(ApiError::store)?;
  Ok(Json(volunteers))
}

/// `POST /volunteers`
pub async fn create<S, R>(
  State(state): State<AppState<S, R>>,
  Json(body): Json<NewVolunteer>,
) -> Result<impl IntoResponse, ApiError>
where
  S: VolunteerStore,
  R: RosterSource,
{
  let volunteer =
    state.store.add_volunteer(body).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(volunteer)))
}

/// `GET /volunteers/:id`
pub async fn get_one<S, R>(
  State(state): State<AppState<S, R>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Volunteer>, ApiError>
where
  S: VolunteerStore,
  R: RosterSource,
{
  Ok(Json(require_volunteer(&*state.store, id).await?))
}

/// `PUT /volunteers/:id`
pub async fn update<S, R>(
  State(state): State<AppState<S, R>>,
  Path(id): Path<Uuid>,
  Json(body): Json<VolunteerUpdate>,
) -> Result<Json<Volunteer>, ApiError>
where
  S: VolunteerStore,
  R: RosterSource,
{
  require_volunteer(&*state.store, id).await?;
  let volunteer = state
    .store
    .update_volunteer(id, body)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(volunteer))
}

/// `DELETE /volunteers/:id`
pub async fn delete<S, R>(
  State(state): State<AppState<S, R>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: VolunteerStore,
  R: RosterSource,
{
  require_volunteer(&*state.store, id).await?;
  state.store.delete_volunteer(id).await.map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── History ──────────────────────────────────────────────────────────────────

/// `GET /volunteers/:id/history`
pub async fn history<S, R>(
  State(state): State<AppState<S, R>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<Interaction>>, ApiError>
where
  S: VolunteerStore,
  R: RosterSource,
{
  require_volunteer(&*state.store, id).await?;
  let query = InteractionQuery { volunteer_id: Some(id), ..Default::default() };
  let interactions = state
    .store
    .list_interactions(query)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(interactions))
}

// ─── Team refresh ─────────────────────────────────────────────────────────────

/// `POST /volunteers/:id/teams` — re-fetch the team list from the roster
/// service and cache it on the volunteer.
pub async fn refresh_teams<S, R>(
  State(state): State<AppState<S, R>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<String>>, ApiError>
where
  S: VolunteerStore,
  R: RosterSource,
{
  let roster = state
    .roster
    .as_ref()
    .ok_or(ApiError::Unavailable("roster sync is not configured"))?;

  let volunteer = require_volunteer(&*state.store, id).await?;
  let Some(roster_id) = volunteer.roster_id else {
    return Err(ApiError::BadRequest(
      "volunteer is not linked to a roster record".to_owned(),
    ));
  };

  let teams = roster.fetch_teams(&roster_id).await;
  state
    .store
    .set_teams(id, teams.clone())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(teams))
}

// ─── Summary ──────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct SummaryBody {
  pub focus: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
  pub summary:  String,
  pub provider: &'static str,
}

/// `POST /volunteers/:id/summary` — body (optional): `{"focus":"..."}`
pub async fn summarize<S, R>(
  State(state): State<AppState<S, R>>,
  Path(id): Path<Uuid>,
  body: Option<Json<SummaryBody>>,
) -> Result<Json<SummaryResponse>, ApiError>
where
  S: VolunteerStore,
  R: RosterSource,
{
  let summarizer = state
    .summarizer
    .as_ref()
    .ok_or(ApiError::Unavailable("summary generation is not configured"))?;

  let volunteer = require_volunteer(&*state.store, id).await?;
  let query = InteractionQuery { volunteer_id: Some(id), ..Default::default() };
  let interactions = state
    .store
    .list_interactions(query)
    .await
    .map_err(ApiError::store)?;

  // No history means nothing to summarize; don't bother the provider.
  if interactions.is_empty() {
    return Err(ApiError::BadRequest(
      "volunteer has no interactions to summarize".to_owned(),
    ));
  }

  let focus = body.as_ref().and_then(|b| b.focus.as_deref());
  let summary = summarizer
    .summarize(&volunteer.full_name(), &interactions, focus)
    .await
    .map_err(|e| ApiError::Upstream(e.to_string()))?;

  Ok(Json(SummaryResponse { summary, provider: summarizer.provider() }))
}
