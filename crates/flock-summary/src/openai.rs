//! OpenAI chat-completions backend.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{Error, Result, prompt::SYSTEM_PROMPT};

const API_URL: &str = "https://api.openai.com/v1/chat/completions";
const MODEL: &str = "gpt-3.5-turbo";
const MAX_TOKENS: u32 = 500;
const TEMPERATURE: f32 = 0.7;

pub const PROVIDER: &str = "openai";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
  model:       &'a str,
  max_tokens:  u32,
  temperature: f32,
  messages:    Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
  role:    &'a str,
  content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
  choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
  message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
  #[serde(default)]
  content: Option<String>,
}

impl ChatResponse {
  fn into_text(self) -> Result<String> {
    self
      .choices
      .into_iter()
      .find_map(|c| c.message.content.filter(|t| !t.is_empty()))
      .ok_or(Error::EmptyCompletion { provider: PROVIDER })
  }
}

pub async fn complete(
  client: &Client,
  api_key: &str,
  prompt: &str,
) -> Result<String> {
  let request = ChatRequest {
    model:       MODEL,
    max_tokens:  MAX_TOKENS,
    temperature: TEMPERATURE,
    messages:    vec![
      Message { role: "system", content: SYSTEM_PROMPT },
      Message { role: "user", content: prompt },
    ],
  };

  let resp = client
    .post(API_URL)
    .bearer_auth(api_key)
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

  let payload: ChatResponse = resp.json().await.map_err(|e| Error::Payload {
    provider: PROVIDER,
    message:  e.to_string(),
  })?;
  payload.into_text()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn response_text_is_taken_from_first_choice() {
    let payload: ChatResponse = serde_json::from_str(
      r#"{ "choices": [
        { "message": { "role": "assistant", "content": "Sam is thriving." } }
      ] }"#,
    )
    .unwrap();
    assert_eq!(payload.into_text().unwrap(), "Sam is thriving.");
  }

  #[test]
  fn missing_choices_is_an_error() {
    let payload: ChatResponse =
      serde_json::from_str(r#"{ "choices": [] }"#).unwrap();
    assert!(matches!(
      payload.into_text().unwrap_err(),
      Error::EmptyCompletion { provider: "openai" }
    ));
  }
}
