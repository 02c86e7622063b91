//! OpenAI-compatible chat-completions client.

use std::time::Duration;

use async_trait::async_trait;
use causerie_core::{ChatMessage, CompletionProvider, SamplingParams};
use reqwest::Client;
use serde_json::json;
use tracing::info;

/// Model requested for every completion.
const MODEL_ID: &str = "gpt-3.5-turbo";

/// Hard cap on generated tokens per turn.
const MAX_OUTPUT_TOKENS: u32 = 20;

/// Generation stops at the first newline.
const STOP_MARKERS: [&str; 1] = ["\n"];

/// Upper bound on one completion round trip.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Returned when the provider comes back with no choices.
pub const NO_RESPONSE_FALLBACK: &str = "No response found";

/// Stateless chat-completions client; owns no conversation state and
/// issues exactly one call per [`CompletionProvider::complete`]. Failures
/// are not retried.
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiProvider {
    #[must_use]
    pub fn new(api_key: String) -> Self {
        info!("Creating OpenAiProvider");
        Self {
            client: Client::new(),
            api_key,
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }

    /// Point the client at a compatible gateway.
    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        sampling: SamplingParams,
    ) -> anyhow::Result<String> {
        let request = json!({
            "model": MODEL_ID,
            "messages": messages,
            "top_p": sampling.top_p,
            "frequency_penalty": sampling.frequency_penalty,
            "max_tokens": MAX_OUTPUT_TOKENS,
            "stop": STOP_MARKERS,
        });

        info!("Sending completion request: model={MODEL_ID}");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .timeout(REQUEST_TIMEOUT)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await?;

        Ok(first_choice_text(&response))
    }
}

/// Extract the first generated choice, falling back when none came back.
fn first_choice_text(response: &serde_json::Value) -> String {
    response["choices"][0]["message"]["content"]
        .as_str()
        .map_or_else(|| NO_RESPONSE_FALLBACK.to_string(), ToString::to_string)
}
