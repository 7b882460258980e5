//! Error type for `flock-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] flock_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("column decode error: {0}")]
  Decode(String),

  #[error("volunteer not found: {0}")]
  VolunteerNotFound(uuid::Uuid),

  #[error("interaction not found: {0}")]
  InteractionNotFound(uuid::Uuid),

  #[error("team member not found: {0}")]
  MemberNotFound(uuid::Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
