//! Anthropic messages-API backend.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{Error, Result, prompt::SYSTEM_PROMPT};

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const MODEL: &str = "claude-3-5-sonnet-20241022";
const MAX_TOKENS: u32 = 500;

pub const PROVIDER: &str = "anthropic";

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
  model:      &'a str,
  max_tokens: u32,
  system:     &'a str,
  messages:   Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
  role:    &'a str,
  content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
  content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
  #[serde(default)]
  text: Option<String>,
}

impl MessagesResponse {
  fn into_text(self) -> Result<String> {
    self
      .content
      .into_iter()
      .find_map(|block| block.text.filter(|t| !t.is_empty()))
      .ok_or(Error::EmptyCompletion { provider: PROVIDER })
  }
}

pub async fn complete(
  client: &Client,
  api_key: &str,
  prompt: &str,
) -> Result<String> {
  let request = MessagesRequest {
    model:      MODEL,
    max_tokens: MAX_TOKENS,
    system:     SYSTEM_PROMPT,
    messages:   vec![Message { role: "user", content: prompt }],
  };

  let resp = client
    .post(API_URL)
    .header("x-api-key", api_key)
    .header("anthropic-version", API_VERSION)
    .json(&request)
    .send()
    .await
    .map_err(|e| Error::Backend {
      provider: PROVIDER,
      message:  e.to_string(),
    })?;

  if !resp.status().is_success() {
    return Err(Error::Status { provider: PROVIDER, status: resp.status() });
  }

  let payload: MessagesResponse =
    resp.json().await.map_err(|e| Error::Payload {
      provider: PROVIDER,
      message:  e.to_string(),
    })?;
  payload.into_text()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn response_text_is_taken_from_first_text_block() {
    let payload: MessagesResponse = serde_json::from_str(
      r#"{ "content": [
        { "type": "text", "text": "Grace has been steady." }
      ] }"#,
    )
    .unwrap();
    assert_eq!(payload.into_text().unwrap(), "Grace has been steady.");
  }

  #[test]
  fn empty_content_is_an_error() {
    let payload: MessagesResponse =
      serde_json::from_str(r#"{ "content": [] }"#).unwrap();
    assert!(matches!(
      payload.into_text().unwrap_err(),
      Error::EmptyCompletion { provider: "anthropic" }
    ));
  }

  #[test]
  fn textless_blocks_are_skipped() {
    let payload: MessagesResponse = serde_json::from_str(
      r#"{ "content": [
        { "type": "tool_use" },
        { "type": "text", "text": "Summary here." }
      ] }"#,
    )
    .unwrap();
    assert_eq!(payload.into_text().unwrap(), "Summary here.");
  }
}
