use std::time::Duration;

use askama::Template;
use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs},
    Client,
};
use backoff::ExponentialBackoffBuilder;
use serde_json::Value;
use thiserror::Error;

use crate::{configuration::InsightSettings, domain::company::InsightResult};

#[derive(Template)]
#[template(path = "prompts/insight_v1.txt")]
pub struct InsightPrompt<'a> {
    pub text: &'a str,
}

#[derive(Debug, Error)]
pub enum InsightError {
    #[error("prompt rendering failed: {0}")]
    Prompt(#[from] askama::Error),
    #[error("completion request failed: {0}")]
    Completion(#[from] OpenAIError),
    #[error("completion returned no content")]
    EmptyResponse,
    #[error("completion is not a JSON object: {0}")]
    InvalidJson(String),
}

pub struct OpenaiClient {
    client: Client<OpenAIConfig>,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenaiClient {
    pub fn new(api_key: String, settings: &InsightSettings) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(settings.api_base.trim_end_matches('/'));

        // A rate-limited reply fails the call instead of being retried
        let no_retry = ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();

        OpenaiClient {
            client: Client::with_config(config).with_backoff(no_retry),
            model: settings.model.clone(),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
        }
    }

    pub async fn generate_insight(&self, text: &str) -> Result<InsightResult, InsightError> {
        let prompt = InsightPrompt { text }.render()?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages([ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()?
                .into()])
            .max_tokens(self.max_tokens)
            .temperature(self.temperature)
            .build()?;

        let response = self.client.chat().create(request).await?;
        log::debug!("Completion response: {:?}", response);

        let first_choice = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(InsightError::EmptyResponse)?;

        parse_insight(&first_choice)
    }
}

/// Parses the model reply. Surrounding prose or code fences are ignored, the
/// payload is everything from the first `{` to the last `}`.
pub fn parse_insight(reply: &str) -> Result<InsightResult, InsightError> {
    let payload = extract_json_payload(reply)
        .ok_or_else(|| InsightError::InvalidJson(format!("no JSON object in {:?}", reply)))?;

    match serde_json::from_str::<Value>(payload) {
        Ok(Value::Object(object)) => Ok(InsightResult::from_json_object(&object)),
        Ok(other) => Err(InsightError::InvalidJson(format!("unexpected value {}", other))),
        Err(e) => Err(InsightError::InvalidJson(e.to_string())),
    }
}

fn extract_json_payload(raw: &str) -> Option<&str> {
    let text = raw.trim();
    let start = text.find('{')?;
    let end = text.rfind('}')?;

    (end > start).then(|| &text[start..=end])
}
