//! Error types for `flock-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("volunteer not found: {0}")]
  VolunteerNotFound(Uuid),

  #[error("interaction not found: {0}")]
  InteractionNotFound(Uuid),

  #[error("team member not found: {0}")]
  MemberNotFound(Uuid),

  /// A required field is absent given the rest of the record.
  #[error("validation failed: missing field {field:?}")]
  MissingField { field: &'static str },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
