use std::time::{Duration, Instant};

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use thiserror::Error;

use crate::core::config::Settings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ResponseFormat {
    Text,
    /// Ask for a single JSON object carrying exactly these keys.
    JsonObject { fields: &'static [&'static str] },
}

#[derive(Debug, Clone)]
pub(crate) struct GenerationRequest {
    pub(crate) flow: &'static str,
    pub(crate) system: String,
    pub(crate) prompt: String,
    pub(crate) format: ResponseFormat,
}

#[derive(Debug, Error)]
pub(crate) enum GeneratorError {
    #[error("request to text generator failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("text generator returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("text generator response had no message content")]
    MissingContent,
}

/// One prompt in, one completion out.
#[async_trait]
pub(crate) trait TextGenerator: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GeneratorError>;
}

#[derive(Debug, Clone)]
pub(crate) struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
    temperature: f64,
}

impl OpenAiClient {
    pub(crate) fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let timeout = Duration::from_secs(settings.ai().ai_request_timeout);
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_key: settings.ai().openai_api_key.clone(),
            base_url: settings.ai().openai_base_url.trim_end_matches('/').to_string(),
            model: settings.ai().ai_model.clone(),
            max_tokens: settings.ai().ai_max_tokens,
            temperature: settings.ai().ai_temperature,
        })
    }

    fn payload(&self, request: &GenerationRequest) -> Value {
        let mut payload = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": request.system},
                {"role": "user", "content": request.prompt}
            ],
            "max_completion_tokens": self.max_tokens,
            "temperature": self.temperature,
        });

        if let ResponseFormat::JsonObject { .. } = request.format {
            payload["response_format"] = json!({"type": "json_object"});
        }

        payload
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GeneratorError> {
        let timer = Instant::now();
        let url = format!("{}/chat/completions", self.base_url);
        let payload = self.payload(&request);

        tracing::info!(flow = request.flow, model = %self.model, "Sending AI generation request");

        let response = self.client.post(&url).bearer_auth(&self.api_key).json(&payload).send().await?;
        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);

        if !status.is_success() {
            return Err(GeneratorError::Status { status: status.as_u16(), body: body.to_string() });
        }

        let content = extract_content(&body).ok_or(GeneratorError::MissingContent)?;

        let tokens_used = body
            .get("usage")
            .and_then(|usage| usage.get("total_tokens"))
            .and_then(|value| value.as_u64());
        tracing::info!(
            flow = request.flow,
            duration_seconds = timer.elapsed().as_secs_f64(),
            tokens_used = ?tokens_used,
            "AI generation completed"
        );

        Ok(content)
    }
}

fn extract_content(body: &Value) -> Option<String> {
    body.get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|value| value.as_str())
        .map(str::to_string)
}
