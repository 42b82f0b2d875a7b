use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::domain::{DomainError, GenerationOutputs, Generator, Signature};
use crate::infrastructure::http_client::HttpClientTrait;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

/// Generator backed by an OpenAI-compatible chat completions endpoint.
///
/// A signature is rendered into a system message describing the output
/// contract plus a user message carrying the input values; the model is
/// asked for a JSON object and its fields become the generation outputs.
#[derive(Debug)]
pub struct OpenAiGenerator<C: HttpClientTrait> {
    client: C,
    auth_header: String,
    base_url: String,
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl<C: HttpClientTrait> OpenAiGenerator<C> {
    pub fn new(client: C, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, model, DEFAULT_OPENAI_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            auth_header: format!("Bearer {}", api_key.into()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Authorization", self.auth_header.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    fn render_system_message(&self, signature: &Signature) -> String {
        let mut message = String::new();
        message.push_str(&signature.instruction);

        message.push_str("\n\nInput fields:\n");
        for field in &signature.inputs {
            message.push_str(&format!("- {}: {}\n", field.name, field.description));
        }

        message.push_str("\nRespond with a single JSON object containing exactly these fields:\n");
        for field in &signature.outputs {
            message.push_str(&format!("- {}: {}\n", field.name, field.description));
        }

        message
    }

    fn render_user_message(
        &self,
        signature: &Signature,
        inputs: &[(&str, &str)],
    ) -> Result<String, DomainError> {
        let mut sections = Vec::with_capacity(signature.inputs.len());

        for field in &signature.inputs {
            let value = inputs
                .iter()
                .find(|(name, _)| *name == field.name)
                .map(|(_, value)| *value)
                .ok_or_else(|| {
                    DomainError::validation(format!(
                        "Missing input '{}' for signature '{}'",
                        field.name, signature.name
                    ))
                })?;

            sections.push(format!("{}: {}", field.name, value));
        }

        Ok(sections.join("\n\n"))
    }

    fn build_request(&self, system: String, user: String) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user},
            ],
            "response_format": {"type": "json_object"},
        });

        if let Some(temperature) = self.temperature {
            body["temperature"] = serde_json::json!(temperature);
        }

        if let Some(max_tokens) = self.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        body
    }

    fn parse_outputs(
        &self,
        signature: &Signature,
        content: &str,
    ) -> Result<GenerationOutputs, DomainError> {
        let json_str = extract_json(content).unwrap_or(content);

        let parsed: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json_str)
            .map_err(|e| {
                DomainError::generation(format!(
                    "Response for '{}' is not a JSON object: {}",
                    signature.name, e
                ))
            })?;

        let mut outputs = GenerationOutputs::new();
        for field in &signature.outputs {
            match parsed.get(&field.name) {
                Some(serde_json::Value::String(value)) => {
                    outputs = outputs.with_field(&field.name, value);
                }
                Some(serde_json::Value::Null) | None => {
                    if field.name != crate::domain::REASONING_FIELD {
                        return Err(DomainError::generation(format!(
                            "Missing output field '{}' in '{}' response",
                            field.name, signature.name
                        )));
                    }
                }
                Some(value) => {
                    outputs = outputs.with_field(&field.name, value.to_string());
                }
            }
        }

        Ok(outputs)
    }
}

#[async_trait]
impl<C: HttpClientTrait> Generator for OpenAiGenerator<C> {
    async fn generate(
        &self,
        signature: &Signature,
        inputs: Vec<(&str, &str)>,
    ) -> Result<GenerationOutputs, DomainError> {
        let system = self.render_system_message(signature);
        let user = self.render_user_message(signature, &inputs)?;
        let body = self.build_request(system, user);

        let response = self
            .client
            .post_json(&self.chat_completions_url(), self.headers(), &body)
            .await?;

        let response: ChatCompletionResponse = serde_json::from_value(response).map_err(|e| {
            DomainError::provider("openai", format!("Failed to parse response: {}", e))
        })?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::provider("openai", "No choices in response"))?;

        let content = choice.message.content.unwrap_or_default();
        if content.is_empty() {
            return Err(DomainError::provider("openai", "Empty response content"));
        }

        if let Some(usage) = response.usage {
            debug!(
                signature = signature.name.as_str(),
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Chat completion finished"
            );
        }

        let outputs = self.parse_outputs(signature, &content)?;
        if let Some(reasoning) = outputs.reasoning() {
            debug!(
                signature = signature.name.as_str(),
                reasoning_chars = reasoning.len(),
                "Discarding chain-of-thought reasoning"
            );
        }

        Ok(outputs)
    }

    fn generator_name(&self) -> &'static str {
        "openai"
    }
}

/// Extract a JSON object from a string (handles markdown code blocks)
fn extract_json(text: &str) -> Option<&str> {
    if let Some(start) = text.find('{') {
        if let Some(end) = text.rfind('}') {
            if start < end {
                return Some(&text[start..=end]);
            }
        }
    }

    None
}

// OpenAI API types

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
    usage: Option<ChatCompletionUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ChatCompletionMessage,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}
