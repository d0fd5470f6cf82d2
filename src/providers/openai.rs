// OpenAI chat-completions generator
//
// Works with OpenAI and any server exposing the same /v1/chat/completions
// format (set base_url accordingly).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::prompts::{system_prompt, user_prompt};
use super::{ContentGenerator, EmotionSupport, GeneratedContent};
use crate::config::GeneratorConfig;
use crate::errors::GenerationError;
use crate::forms::FormSubmission;

/// OpenAI-compatible content generator
#[derive(Clone)]
pub struct OpenAIGenerator {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    timeout_secs: u64,
}

impl OpenAIGenerator {
    /// Create a generator from config; fails when no API key is set
    pub fn from_config(config: &GeneratorConfig) -> Result<Self, GenerationError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| GenerationError::NotConfigured("OPENAI_API_KEY missing".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GenerationError::NotConfigured(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn to_openai_request(&self, submission: &FormSubmission) -> OpenAIRequest {
        OpenAIRequest {
            model: self.model.clone(),
            messages: vec![
                OpenAIMessage {
                    role: "system".to_string(),
                    content: system_prompt(submission).to_string(),
                },
                OpenAIMessage {
                    role: "user".to_string(),
                    content: user_prompt(submission),
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    fn timed_out(&self) -> GenerationError {
        GenerationError::Timeout {
            timeout_secs: self.timeout_secs,
        }
    }

    fn map_send_error(&self, err: reqwest::Error) -> GenerationError {
        if err.is_timeout() {
            self.timed_out()
        } else {
            GenerationError::Transport(err.to_string())
        }
    }

    /// The client timeout also covers reading the body
    fn map_body_error(&self, err: reqwest::Error) -> GenerationError {
        if err.is_timeout() {
            self.timed_out()
        } else {
            GenerationError::InvalidResponse(format!("Failed to parse response: {}", err))
        }
    }

    /// Send a single chat-completions request and return the assistant text
    async fn complete(&self, submission: &FormSubmission) -> Result<String, GenerationError> {
        let request = self.to_openai_request(submission);
        let url = format!("{}/v1/chat/completions", self.base_url);

        tracing::debug!(feature = %submission.feature(), model = %self.model, "Sending request to OpenAI API");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| self.map_body_error(e))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| GenerationError::InvalidResponse("no content in response".to_string()))
    }
}

#[async_trait]
impl ContentGenerator for OpenAIGenerator {
    async fn generate(&self, submission: &FormSubmission) -> Result<GeneratedContent, GenerationError> {
        let raw = self.complete(submission).await?;

        let text = match submission {
            FormSubmission::Emotions(_) => match EmotionSupport::parse(&raw) {
                Some(support) => support.to_text(),
                None => {
                    tracing::warn!(raw_output = %raw, "Model reply was not valid support JSON, using fallback");
                    EmotionSupport::fallback().to_text()
                }
            },
            _ => raw,
        };

        Ok(GeneratedContent::new(submission.feature(), text))
    }

    fn name(&self) -> &str {
        "openai"
    }
}

// OpenAI API types

#[derive(Debug, Clone, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Clone, Serialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    #[serde(default)]
    content: Option<String>,
}
