//! JSON REST API for Flock.
//!
//! Exposes an axum [`Router`] backed by any
//! [`flock_core::store::VolunteerStore`]. Roster sync and summary generation
//! are optional capabilities; endpoints that need one respond 503 when it was
//! not configured. Auth, TLS, and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", flock_api::api_router(state))
//! ```

pub mod dashboard;
pub mod error;
pub mod interactions;
pub mod members;
pub mod roster;
pub mod volunteers;


use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use flock_core::store::VolunteerStore;
use flock_roster::{RosterSource, RosterSync};
use flock_summary::Summarizer;

pub use error::ApiError;

/// Shared handler state. `roster` and `summarizer` are `None` when the
/// corresponding credentials were not configured.
pub struct AppState<S, R> {
  pub store:      Arc<S>,
  pub roster:     Option<Arc<RosterSync<S, R>>>,
  pub summarizer: Option<Arc<Summarizer>>,
}

// Derived Clone would demand S: Clone and R: Clone.
impl<S, R> Clone for AppState<S, R> {
  fn clone(&self) -> Self {
    Self {
      store:      self.store.clone(),
      roster:     self.roster.clone(),
      summarizer: self.summarizer.clone(),
    }
  }
}

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, R>(state: AppState<S, R>) -> Router<()>
where
  S: VolunteerStore + 'static,
  R: RosterSource + 'static,
{
  Router::new()
    // Volunteers
    .route(
      "/volunteers",
      get(volunteers::list::<S, R>).post(volunteers::create::<S, R>),
    )
    .route(
      "/volunteers/{id}",
      get(volunteers::get_one::<S, R>)
        .put(volunteers::update::<S, R>)
        .delete(volunteers::delete::<S, R>),
    )
    .route("/volunteers/{id}/history", get(volunteers::history::<S, R>))
    .route(
      "/volunteers/{id}/teams",
      post(volunteers::refresh_teams::<S, R>),
    )
    .route(
      "/volunteers/{id}/summary",
      post(volunteers::summarize::<S, R>),
    )
    // Interactions
    .route(
      "/interactions",
      get(interactions::list::<S, R>).post(interactions::create::<S, R>),
    )
    .route(
      "/interactions/{id}",
      get(interactions::get_one::<S, R>)
        .put(interactions::update::<S, R>)
        .delete(interactions::delete::<S, R>),
    )
    .route(
      "/interactions/{id}/complete",
      post(interactions::complete::<S, R>),
    )
    // Team members
    .route(
      "/members",
      get(members::list::<S, R>).post(members::create::<S, R>),
    )
    .route(
      "/members/{id}",
      get(members::get_one::<S, R>).delete(members::delete::<S, R>),
    )
    .route("/members/{id}/stats", get(members::stats::<S, R>))
    // Roster sync
    .route("/sync", post(roster::run_sync::<S, R>))
    .route("/sync/status", get(roster::status::<S, R>))
    // Dashboard
    .route("/dashboard", get(dashboard::overview::<S, R>))
    .route("/dashboard/trends", get(dashboard::trends::<S, R>))
    .route(
      "/dashboard/team-activity",
      get(dashboard::team_activity::<S, R>),
    )
    .route("/dashboard/checkins", get(dashboard::checkins::<S, R>))
    .route("/dashboard/engagement", get(dashboard::engagement::<S, R>))
    .route("/dashboard/recent", get(dashboard::recent::<S, R>))
    .route("/dashboard/followups", get(dashboard::followups::<S, R>))
    .with_state(state)
}
