//! OpenAI-compatible chat completion client.
//!
//! Sends `POST {base_url}/chat/completions` with a system and a user
//! message and returns the first choice's content. Works with any endpoint
//! that speaks the same protocol (OpenRouter, DeepSeek, local servers).

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{CompletionClient, CompletionError, CompletionRequest};

/// Endpoint used when `OPENAI_BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const API_KEY_VAR: &str = "OPENAI_API_KEY";
const BASE_URL_VAR: &str = "OPENAI_BASE_URL";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    #[serde(default)]
    content: Option<String>,
}

/// Client for OpenAI-compatible `/chat/completions` endpoints.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiClient {
    /// Build a client from an explicit key and base URL.
    ///
    /// Fails only if the HTTP client cannot be constructed (for example when
    /// the TLS backend cannot load the native root store).
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, CompletionError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            api_key: api_key.into().trim().to_owned(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            client,
        })
    }

    /// Build a client from `OPENAI_API_KEY` and `OPENAI_BASE_URL`.
    pub fn from_env() -> Result<Self, CompletionError> {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(CompletionError::MissingApiKey)?;
        let base_url = std::env::var(BASE_URL_VAR)
            .ok()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        let client = Self::new(api_key, base_url)?;
        tracing::debug!(base_url = %client.base_url, "configured completion endpoint");
        Ok(client)
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let body = ChatRequest {
            model: &request.model,
            temperature: request.temperature,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
        };

        tracing::debug!(endpoint = %self.endpoint(), model = %request.model, "sending completion request");
        let res = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = res.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(CompletionError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let client = OpenAiClient::new(" key ", "http://localhost:8080/v1/").unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8080/v1/chat/completions");
        assert_eq!(client.api_key, "key");
    }

    #[test]
    fn request_body_has_system_then_user() {
        let body = ChatRequest {
            model: "gpt-4o-mini",
            temperature: 0.5,
            messages: [
                ChatMessage {
                    role: "system",
                    content: "plan",
                },
                ChatMessage {
                    role: "user",
                    content: "text",
                },
            ],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "text");
    }

    #[test]
    fn response_without_content_is_tolerated() {
        let parsed: ChatResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"role": "assistant"}}]}"#).unwrap();
        assert!(parsed.choices[0].message.content.is_none());

        let parsed: ChatResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.choices.is_empty());
    }

    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    #[test]
    fn from_env_requires_key_and_defaults_base_url() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        // SAFETY: env access in this module is serialized by ENV_LOCK.
        unsafe {
            std::env::remove_var(API_KEY_VAR);
            std::env::remove_var(BASE_URL_VAR);
        }
        assert!(matches!(OpenAiClient::from_env(), Err(CompletionError::MissingApiKey)));

        // SAFETY: as above.
        unsafe { std::env::set_var(API_KEY_VAR, "sk-test") };
        let client = OpenAiClient::from_env().unwrap();
        assert_eq!(client.endpoint(), format!("{DEFAULT_BASE_URL}/chat/completions"));

        // SAFETY: as above.
        unsafe { std::env::remove_var(API_KEY_VAR) };
    }
}
