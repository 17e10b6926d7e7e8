//! Chat-completions client

use crate::config::{AiConfig, KeyValueStore};
use crate::error::{Error, Result};
use crate::knowledge::KnowledgeBase;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const TEMPERATURE: f64 = 0.7;
pub const MAX_TOKENS: u32 = 1000;
/// Upper bound on one round trip
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const FALLBACK_ERROR: &str = "AI request failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

/// Message from an error body, or the generic one
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .and_then(|e| e.message)
        .unwrap_or_else(|| FALLBACK_ERROR.to_string())
}

/// Client for an OpenAI-compatible chat-completions endpoint
///
/// One request per call, no retries.
#[derive(Debug, Clone)]
pub struct AiClient {
    http: Client,
    config: AiConfig,
    system_message: String,
}

impl AiClient {
    pub fn new(config: AiConfig, knowledge: &KnowledgeBase) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(Error::NotConfigured);
        }
        config.validate()?;

        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            config,
            system_message: knowledge.system_message()?,
        })
    }

    /// Build from saved settings
    pub fn from_store(store: &impl KeyValueStore, knowledge: &KnowledgeBase) -> Result<Self> {
        let config = AiConfig::load(store).ok_or(Error::NotConfigured)?;
        Self::new(config, knowledge)
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// System message, prior turns, then the new question
    pub fn build_messages(&self, question: &str, history: &[ChatMessage]) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::system(self.system_message.clone()));
        messages.extend(history.iter().cloned());
        messages.push(ChatMessage::user(question));
        messages
    }

    /// Ask a question in the context of earlier turns
    pub async fn ask(&self, question: &str, history: &[ChatMessage]) -> Result<String> {
        let request = CompletionRequest {
            model: &self.config.model,
            messages: self.build_messages(question, history),
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        tracing::debug!(
            model = %self.config.model,
            history = history.len(),
            "sending chat completion"
        );
        let response = self
            .http
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "AI request failed to send"))?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = api_error_message(&body);
            tracing::warn!(status = status.as_u16(), %message, "AI request rejected");
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: CompletionResponse = serde_json::from_str(&body)?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| Error::MalformedResponse("response has no message content".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::serve_once;
    use serde_json::Value;

    fn client(base_url: &str) -> AiClient {
        let kb = KnowledgeBase::builtin().unwrap();
        AiClient::new(AiConfig::new("sk-test", base_url, "test-model"), &kb).unwrap()
    }

    #[test]
    fn test_requires_api_key() {
        let kb = KnowledgeBase::builtin().unwrap();
        let err = AiClient::new(AiConfig::default(), &kb).unwrap_err();
        assert!(matches!(err, Error::NotConfigured));
    }

    #[test]
    fn test_message_order() {
        let client = client("http://localhost/v1");
        let history = vec![
            ChatMessage::assistant("Hi!"),
            ChatMessage::user("Earlier question"),
        ];
        let messages = client.build_messages("New question", &history);

        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1], history[0]);
        assert_eq!(messages[2], history[1]);
        assert_eq!(messages[3], ChatMessage::user("New question"));
    }

    #[test]
    fn test_error_message_fallback() {
        assert_eq!(
            api_error_message(r#"{"error":{"message":"Invalid API key"}}"#),
            "Invalid API key"
        );
        assert_eq!(api_error_message(r#"{"error":{}}"#), "AI request failed");
        assert_eq!(api_error_message("<html>bad gateway</html>"), "AI request failed");
    }

    #[tokio::test]
    async fn test_ask_posts_completion_request() {
        let (base_url, server) = serve_once(
            200,
            r#"{"choices":[{"message":{"role":"assistant","content":"Plant trees! 🌳"}}]}"#,
        )
        .await;
        let client = client(&base_url);

        let reply = client
            .ask("How can I help?", &[ChatMessage::assistant("Welcome")])
            .await
            .unwrap();
        assert_eq!(reply, "Plant trees! 🌳");

        let request = server.await.unwrap();
        assert!(request.head.starts_with("POST /v1/chat/completions "));
        assert!(request
            .head
            .to_ascii_lowercase()
            .contains("authorization: bearer sk-test"));

        let body: Value = serde_json::from_str(&request.body).unwrap();
        assert_eq!(body["model"], "test-model");
        assert_eq!(body["temperature"], 0.7);
        assert_eq!(body["max_tokens"], 1000);
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[1]["content"], "Welcome");
        assert_eq!(messages[2]["role"], "user");
        assert_eq!(messages[2]["content"], "How can I help?");
    }

    #[tokio::test]
    async fn test_api_error_surfaces_message() {
        let (base_url, server) =
            serve_once(401, r#"{"error":{"message":"Invalid API key"}}"#).await;
        let err = client(&base_url).ask("hi", &[]).await.unwrap_err();
        server.await.unwrap();

        match err {
            Error::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid API key");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_choices_is_malformed() {
        let (base_url, server) = serve_once(200, r#"{"choices":[]}"#).await;
        let err = client(&base_url).ask("hi", &[]).await.unwrap_err();
        server.await.unwrap();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }
}
