//! OpenAI-compatible chat completions client
//!
//! Uses a long-lived reqwest::Client for connection pooling. The tier picked
//! by the router decides which configured model a request targets.

use crate::config::Settings;
use crate::error::PipelineError;
use crate::llm::ModelBackend;
use crate::models::{Message, Tier};
use crate::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

/// Reusable chat client (connection-pooled)
pub struct OpenAiChatClient {
    client: Client,
    api_key: String,
    base_url: String,
    baseline_model: String,
    advanced_model: String,
    temperature: f32,
}

impl OpenAiChatClient {
    pub fn new(
        api_key: String,
        base_url: String,
        baseline_model: String,
        advanced_model: String,
        temperature: f32,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            baseline_model,
            advanced_model,
            temperature,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(
            settings.require_api_key()?.to_string(),
            settings.base_url.clone(),
            settings.baseline_model.clone(),
            settings.advanced_model.clone(),
            settings.temperature,
            settings.request_timeout,
        )
    }

    pub fn model_for(&self, tier: Tier) -> &str {
        match tier {
            Tier::Baseline => &self.baseline_model,
            Tier::Advanced => &self.advanced_model,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl ModelBackend for OpenAiChatClient {
    async fn complete(&self, messages: &[Message], tier: Tier) -> Result<String> {
        let request = ChatRequest {
            model: self.model_for(tier),
            temperature: self.temperature,
            messages,
        };

        debug!(model = request.model, %tier, "Calling chat completions API");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Chat completions request failed: {}", e);
                PipelineError::ModelCallFailure(format!("Chat completions request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Chat completions error response ({}): {}", status, error_text);
            return Err(PipelineError::ModelCallFailure(format!(
                "Chat completions returned {}: {}",
                status, error_text
            )));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            error!("Failed to parse chat completions response: {}", e);
            PipelineError::ModelCallFailure(format!("Chat completions parse error: {}", e))
        })?;

        if let Some(usage) = &chat_response.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Chat completions usage"
            );
        }

        let choice = chat_response.choices.into_iter().next().ok_or_else(|| {
            PipelineError::ModelCallFailure("No choices in chat completions response".to_string())
        })?;

        match choice.message.content {
            Some(content) if !content.trim().is_empty() => Ok(content),
            _ => Err(PipelineError::ModelCallFailure(format!(
                "Empty completion (finish_reason: {})",
                choice.finish_reason.as_deref().unwrap_or("unknown")
            ))),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: &'a [Message],
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}
