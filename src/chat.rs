use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

pub const DEFAULT_MODEL: &str = "claude-3-haiku-20240307";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Message {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Message {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

pub fn push_user(messages: &mut Vec<Message>, text: impl Into<String>) {
    messages.push(Message::user(text));
}

pub fn push_assistant(messages: &mut Vec<Message>, text: impl Into<String>) {
    messages.push(Message::assistant(text));
}

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api returned status {status}: {message}")]
    Api { status: u16, message: String },
    #[error("response contained no text content")]
    EmptyResponse,
}

/// Explicitly constructed chat client: build it once at startup and pass
/// it to call sites. Holds no state beyond the credential and the
/// connection pool.
pub struct ChatClient {
    http: reqwest::blocking::Client,
    api_key: String,
}

impl ChatClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        ChatClient {
            http: reqwest::blocking::Client::new(),
            api_key: api_key.into(),
        }
    }

    pub fn send(
        &self,
        model: &str,
        max_tokens: u32,
        messages: &[Message],
    ) -> Result<String, ChatError> {
        let body = build_request(model, max_tokens, messages);
        let response = self
            .http
            .post(API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()?;

        let status = response.status();
        let payload: Value = response.json()?;
        if !status.is_success() {
            let message = payload
                .get("error")
                .and_then(|error| error.get("message"))
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            return Err(ChatError::Api {
                status: status.as_u16(),
                message,
            });
        }

        extract_text(&payload).ok_or(ChatError::EmptyResponse)
    }
}

fn build_request(model: &str, max_tokens: u32, messages: &[Message]) -> Value {
    json!({
        "model": model,
        "max_tokens": max_tokens,
        "messages": messages,
    })
}

fn extract_text(payload: &Value) -> Option<String> {
    let blocks = payload.get("content")?.as_array()?;
    let text: Vec<&str> = blocks
        .iter()
        .filter(|block| block.get("type").and_then(Value::as_str) == Some("text"))
        .filter_map(|block| block.get("text").and_then(Value::as_str))
        .collect();
    (!text.is_empty()).then(|| text.join(""))
}
