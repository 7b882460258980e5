//! Error type for `flock-summary`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Construction-time failure: no provider key was supplied.
  #[error("no summary provider configured (set an anthropic or openai key)")]
  MissingApiKey,

  /// Client construction failure, before any provider is chosen.
  #[error("http client error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("{provider} request failed: {message}")]
  Backend {
    provider: &'static str,
    message:  String,
  },

  #[error("{provider} returned {status}")]
  Status {
    provider: &'static str,
    status:   reqwest::StatusCode,
  },

  #[error("unexpected {provider} payload: {message}")]
  Payload {
    provider: &'static str,
    message:  String,
  },

  /// The provider answered but the completion carried no text.
  #[error("{provider} returned an empty completion")]
  EmptyCompletion { provider: &'static str },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
