//! Handlers for `/sync` endpoints.
//!
//! Both respond 503 when the server was started without roster credentials.

use axum::{Json, extract::State};
use flock_core::{
  store::VolunteerStore,
  sync::{ConnectionProbe, SyncReport},
};
use flock_roster::{RosterSource, RosterSync};
use std::sync::Arc;

use crate::{AppState, error::ApiError};

fn require_roster<S, R>(
  state: &AppState<S, R>,
) -> Result<&Arc<RosterSync<S, R>>, ApiError> {
  state
    .roster
    .as_ref()
    .ok_or(ApiError::Unavailable("roster sync is not configured"))
}

/// `POST /sync` — run a full roster sync. Always 200; per-record failures
/// are carried in the report body.
pub async fn run_sync<S, R>(
  State(state): State<AppState<S, R>>,
) -> Result<Json<SyncReport>, ApiError>
where
  S: VolunteerStore,
  R: RosterSource,
{
  let report = require_roster(&state)?.sync().await;
  Ok(Json(report))
}

/// `GET /sync/status` — connectivity probe against the roster service.
pub async fn status<S, R>(
  State(state): State<AppState<S, R>>,
) -> Result<Json<ConnectionProbe>, ApiError>
where
  S: VolunteerStore,
  R: RosterSource,
{
  let probe = require_roster(&state)?.test_connection().await;
  Ok(Json(probe))
}
