//! LLM-backed summaries of a volunteer's interaction history.
//!
//! Two provider backends are supported. When keys for both are configured
//! the anthropic backend is used; provider choice is fixed at construction.

mod anthropic;
pub mod error;
mod openai;
pub mod prompt;

use std::time::Duration;

use flock_core::interaction::Interaction;
use reqwest::Client;

pub use self::error::{Error, Result};

/// Provider keys as read from configuration. Either may be absent.
#[derive(Debug, Clone, Default)]
pub struct SummaryConfig {
  pub anthropic_key: Option<String>,
  pub openai_key:    Option<String>,
}

#[derive(Debug)]
enum Backend {
  Anthropic { api_key: String },
  OpenAi { api_key: String },
}

#[derive(Debug)]
pub struct Summarizer {
  client:  Client,
  backend: Backend,
}

impl Summarizer {
  /// Build a summarizer from configured keys. Fails when neither provider
  /// has a key; empty strings count as absent.
  pub fn new(config: SummaryConfig) -> Result<Self> {
    let non_empty = |key: Option<String>| key.filter(|k| !k.is_empty());

    let backend = match (
      non_empty(config.anthropic_key),
      non_empty(config.openai_key),
    ) {
      (Some(api_key), _) => Backend::Anthropic { api_key },
      (None, Some(api_key)) => Backend::OpenAi { api_key },
      (None, None) => return Err(Error::MissingApiKey),
    };

    let client = Client::builder()
      .timeout(Duration::from_secs(60))
      .build()?;

    Ok(Self { client, backend })
  }

  pub fn provider(&self) -> &'static str {
    match &self.backend {
      Backend::Anthropic { .. } => anthropic::PROVIDER,
      Backend::OpenAi { .. } => openai::PROVIDER,
    }
  }

  /// Summarize one volunteer's history. The caller is expected to have
  /// checked that `interactions` is non-empty.
  pub async fn summarize(
    &self,
    volunteer_name: &str,
    interactions: &[Interaction],
    focus: Option<&str>,
  ) -> Result<String> {
    let prompt = prompt::build_prompt(volunteer_name, interactions, focus);
    tracing::info!(
      provider = self.provider(),
      interactions = interactions.len(),
      "requesting summary"
    );

    match &self.backend {
      Backend::Anthropic { api_key } => {
        anthropic::complete(&self.client, api_key, &prompt).await
      }
      Backend::OpenAi { api_key } => {
        openai::complete(&self.client, api_key, &prompt).await
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn no_keys_is_a_construction_error() {
    assert!(matches!(
      Summarizer::new(SummaryConfig::default()).unwrap_err(),
      Error::MissingApiKey
    ));
  }

  #[test]
  fn empty_keys_count_as_absent() {
    let config = SummaryConfig {
      anthropic_key: Some(String::new()),
      openai_key:    Some(String::new()),
    };
    assert!(matches!(
      Summarizer::new(config).unwrap_err(),
      Error::MissingApiKey
    ));
  }

  #[test]
  fn anthropic_wins_when_both_keys_are_set() {
    let config = SummaryConfig {
      anthropic_key: Some("ak".into()),
      openai_key:    Some("ok".into()),
    };
    assert_eq!(Summarizer::new(config).unwrap().provider(), "anthropic");
  }

  #[test]
  fn openai_is_used_when_it_is_the_only_key() {
    let config = SummaryConfig {
      anthropic_key: None,
      openai_key:    Some("ok".into()),
    };
    assert_eq!(Summarizer::new(config).unwrap().provider(), "openai");
  }
}
