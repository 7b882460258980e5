//! Handlers for `/interactions` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/interactions` | `?volunteer_id=&member_id=&pending=&overdue=` |
//! | `POST`   | `/interactions` | Follow-up request requires a due date |
//! | `GET`    | `/interactions/:id` | 404 if not found |
//! | `PUT`    | `/interactions/:id` | Partial update |
//! | `DELETE` | `/interactions/:id` | |
//! | `POST`   | `/interactions/:id/complete` | Marks the follow-up done today |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::Utc;
use flock_core::{
  interaction::{
    Interaction, InteractionQuery, InteractionUpdate, NewInteraction,
  },
  store::VolunteerStore,
};
use flock_roster::RosterSource;
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

async fn require_interaction<S>(
  store: &S,
  id: Uuid,
) -> Result<Interaction, ApiError>
where
  S: VolunteerStore,
{
  store
    .get_interaction(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("interaction {id} not found")))
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
  pub volunteer_id: Option<Uuid>,
  pub member_id:    Option<Uuid>,
  /// Only follow-ups that are requested and not yet completed.
  #[serde(default)]
  pub pending:      bool,
  /// Like `pending`, but additionally past due as of today.
  #[serde(default)]
  pub overdue:      bool,
}

/// `GET /interactions`
pub async fn list<S, R>(
  State(state): State<AppState<S, R>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Interaction>>, ApiError>
where
  S: VolunteerStore,
  R: RosterSource,
{
  let query = InteractionQuery {
    volunteer_id: params.volunteer_id,
    member_id:    params.member_id,
    pending:      params.pending,
    overdue_on:   params.overdue.then(|| Utc::now().date_naive()),
  };
  let interactions = state
    .store
    .list_interactions(query)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(interactions))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /interactions`
pub async fn create<S, R>(
  State(state): State<AppState<S, R>>,
  Json(body): Json<NewInteraction>,
) -> Result<impl IntoResponse, ApiError>
where
  S: VolunteerStore,
  R: RosterSource,
{
  body
    .validate()
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

  let volunteer_id = body.volunteer_id;
  state
    .store
    .get_volunteer(volunteer_id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| {
      ApiError::NotFound(format!("volunteer {volunteer_id} not found"))
    })?;

  let interaction = state
    .store
    .record_interaction(body)
    .await
    .map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(interaction)))
}

// ─── Get / update / delete ────────────────────────────────────────────────────

/// `GET /interactions/:id`
pub async fn get_one<S, R>(
  State(state): State<AppState<S, R>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Interaction>, ApiError>
where
  S: VolunteerStore,
  R: RosterSource,
{
  Ok(Json(require_interaction(&*state.store, id).await?))
}

/// `PUT /interactions/:id`
pub async fn update<S, R>(
  State(state): State<AppState<S, R>>,
  Path(id): Path<Uuid>,
  Json(body): Json<InteractionUpdate>,
) -> Result<Json<Interaction>, ApiError>
where
  S: VolunteerStore,
  R: RosterSource,
{
  let existing = require_interaction(&*state.store, id).await?;

  // Check the follow-up invariant against the merged record so the caller
  // gets a 400, not a store error.
  let needs = body.needs_followup.unwrap_or(existing.needs_followup);
  let due = body.followup_date.or(existing.followup_date);
  if needs && due.is_none() {
    return Err(ApiError::BadRequest(
      "a follow-up request requires a due date".to_owned(),
    ));
  }

  let interaction = state
    .store
    .update_interaction(id, body)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(interaction))
}

/// `DELETE /interactions/:id`
pub async fn delete<S, R>(
  State(state): State<AppState<S, R>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: VolunteerStore,
  R: RosterSource,
{
  require_interaction(&*state.store, id).await?;
  state
    .store
    .delete_interaction(id)
    .await
    .map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Complete ─────────────────────────────────────────────────────────────────

/// `POST /interactions/:id/complete`
pub async fn complete<S, R>(
  State(state): State<AppState<S, R>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Interaction>, ApiError>
where
  S: VolunteerStore,
  R: RosterSource,
{
  let existing = require_interaction(&*state.store, id).await?;
  if !existing.needs_followup {
    return Err(ApiError::BadRequest(
      "interaction has no follow-up to complete".to_owned(),
    ));
  }

  let interaction = state
    .store
    .complete_followup(id, Utc::now().date_naive())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(interaction))
}
