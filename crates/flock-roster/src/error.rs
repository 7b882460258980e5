//! Error type for `flock-roster`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Construction-time failure: the client is unusable without both halves
  /// of the credential pair.
  #[error("missing roster credentials (app id and secret are required)")]
  MissingCredentials,

  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("roster service returned {status} for {url}")]
  Status {
    status: reqwest::StatusCode,
    url:    String,
  },

  #[error("unexpected payload: {0}")]
  Payload(#[from] serde_json::Error),

  #[error("person record has no id")]
  MissingId,

  #[error("malformed {name:?} relationship")]
  MalformedRelationship { name: &'static str },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
