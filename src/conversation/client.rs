//! Relay client used by the conversation session
//!
//! The session only needs "send these messages, give me the reply text";
//! [`RelayClient`] is that seam, and [`HttpRelayClient`] implements it over
//! HTTP against the completion relay.

use crate::error::{AdvisorError, Result};
use crate::message::Message;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Reply used when the completion carries no usable content
pub const FALLBACK_REPLY: &str = "Sorry, I couldn’t generate a reply.";

/// Sends a conversation to the relay and returns the assistant's reply
#[async_trait]
pub trait RelayClient: Send + Sync {
    /// Request a completion for `messages`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status, or an
    /// unparsable response body.
    async fn complete(&self, messages: &[Message]) -> Result<String>;
}

#[derive(Serialize)]
struct RelayRequest<'a> {
    messages: &'a [Message],
}

#[derive(Deserialize)]
struct CompletionBody {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl CompletionBody {
    fn into_reply(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|content| !content.is_empty())
            .unwrap_or_else(|| FALLBACK_REPLY.to_string())
    }
}

/// HTTP client for the completion relay
#[derive(Debug, Clone)]
pub struct HttpRelayClient {
    client: Client,
    relay_url: url::Url,
}

impl HttpRelayClient {
    /// Create a client posting to `relay_url`
    ///
    /// # Errors
    ///
    /// Returns `AdvisorError::Config` if the URL cannot be parsed
    pub fn new(relay_url: &str) -> Result<Self> {
        let relay_url = url::Url::parse(relay_url)
            .map_err(|e| AdvisorError::Config(format!("Invalid relay URL: {}", e)))?;
        Ok(Self {
            client: Client::new(),
            relay_url,
        })
    }

    /// The endpoint this client posts to
    pub fn relay_url(&self) -> &str {
        self.relay_url.as_str()
    }
}

#[async_trait]
impl RelayClient for HttpRelayClient {
    async fn complete(&self, messages: &[Message]) -> Result<String> {
        tracing::debug!(count = messages.len(), url = %self.relay_url, "Posting conversation to relay");

        let response = self
            .client
            .post(self.relay_url.clone())
            .json(&RelayRequest { messages })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdvisorError::RelayStatus {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let body: CompletionBody = response.json().await?;
        Ok(body.into_reply())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply_from(json: &str) -> String {
        serde_json::from_str::<CompletionBody>(json)
            .unwrap()
            .into_reply()
    }

    #[test]
    fn test_reply_takes_first_choice() {
        let json = r#"{"choices":[{"message":{"content":"first"}},{"message":{"content":"second"}}]}"#;
        assert_eq!(reply_from(json), "first");
    }

    #[test]
    fn test_reply_falls_back_without_choices() {
        assert_eq!(reply_from(r#"{"choices":[]}"#), FALLBACK_REPLY);
        assert_eq!(reply_from(r#"{"id":"x"}"#), FALLBACK_REPLY);
    }

    #[test]
    fn test_reply_falls_back_on_null_or_empty_content() {
        assert_eq!(
            reply_from(r#"{"choices":[{"message":{"content":null}}]}"#),
            FALLBACK_REPLY
        );
        assert_eq!(
            reply_from(r#"{"choices":[{"message":{"content":""}}]}"#),
            FALLBACK_REPLY
        );
    }

    #[test]
    fn test_new_rejects_bad_url() {
        assert!(HttpRelayClient::new("not a url").is_err());
    }

    #[test]
    fn test_request_shape() {
        let messages = vec![Message::user("hello")];
        let json = serde_json::to_string(&RelayRequest {
            messages: &messages,
        })
        .unwrap();
        assert_eq!(json, r#"{"messages":[{"role":"user","content":"hello"}]}"#);
    }
}
