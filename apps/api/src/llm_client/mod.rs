/// LLM Client — the single point of entry for all Claude API calls.
///
/// ARCHITECTURAL RULE: no other module may call the Anthropic API directly.
/// All LLM interactions MUST go through this module.
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1024;

/// Model names tried in order. Any transport or API failure moves to the
/// next candidate; there is no backoff between attempts.
pub const MODEL_CANDIDATES: &[&str] = &[
    "claude-sonnet-4-5",
    "claude-3-7-sonnet-latest",
    "claude-3-5-haiku-latest",
];

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("all {candidates} candidate models failed")]
    Exhausted { candidates: usize },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// One turn of the chat transcript, in Anthropic Messages API shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: &'a [ChatTurn],
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// Wraps the Anthropic Messages API with sequential model-name fallback:
/// each candidate in [`MODEL_CANDIDATES`] is tried once, in order, and the
/// first success wins.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Sends the transcript and system prompt, falling through the model
    /// candidate list on any failure.
    pub async fn chat(&self, turns: &[ChatTurn], system: &str) -> Result<LlmResponse, LlmError> {
        let mut last_error: Option<LlmError> = None;

        for model in MODEL_CANDIDATES {
            match self.call_model(model, turns, system).await {
                Ok(response) => {
                    debug!(
                        model,
                        input_tokens = response.usage.input_tokens,
                        output_tokens = response.usage.output_tokens,
                        "LLM call succeeded"
                    );
                    return Ok(response);
                }
                Err(e) => {
                    warn!(model, "LLM call failed, trying next candidate: {e}");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(LlmError::Exhausted {
            candidates: MODEL_CANDIDATES.len(),
        }))
    }

    async fn call_model(
        &self,
        model: &str,
        turns: &[ChatTurn],
        system: &str,
    ) -> Result<LlmResponse, LlmError> {
        let request_body = AnthropicRequest {
            model,
            max_tokens: MAX_TOKENS,
            system,
            messages: turns,
        };

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<AnthropicError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: LlmResponse = response.json().await?;
        if parsed.text().is_none() {
            // A completion with no text block counts as a failed candidate.
            return Err(LlmError::EmptyContent);
        }
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_returns_first_text_block() {
        let response = LlmResponse {
            content: vec![
                ContentBlock {
                    block_type: "thinking".into(),
                    text: None,
                },
                ContentBlock {
                    block_type: "text".into(),
                    text: Some("Two projects match your budget.".into()),
                },
            ],
            usage: Usage {
                input_tokens: 10,
                output_tokens: 12,
            },
        };
        assert_eq!(response.text(), Some("Two projects match your budget."));
    }

    #[test]
    fn test_error_envelope_parsing() {
        let body =
            r#"{"type":"error","error":{"type":"not_found_error","message":"model: unknown"}}"#;
        let parsed: AnthropicError = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.error.message, "model: unknown");
    }

    #[test]
    fn test_candidate_list_is_ordered_and_nonempty() {
        assert!(!MODEL_CANDIDATES.is_empty());
        assert_eq!(MODEL_CANDIDATES[0], "claude-sonnet-4-5");
    }
}
