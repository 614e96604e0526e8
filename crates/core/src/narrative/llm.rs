//! LLM clients used to write deck narratives.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::config::{LlmConfig, LlmProvider};

const ANTHROPIC_API_BASE: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const OLLAMA_API_BASE: &str = "http://localhost:11434";

/// Error type for LLM operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Not configured")]
    NotConfigured,
}

/// Token usage statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LlmUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Request for a completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Instructions for the model.
    pub system: Option<String>,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            system: None,
            prompt: prompt.into(),
            max_tokens: 2000,
            temperature: 0.7,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Response from a completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    pub text: String,
    pub usage: LlmUsage,
    /// Model that actually answered.
    pub model: String,
}

/// Trait for LLM clients.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Provider name ("anthropic", "ollama", "mock").
    fn provider(&self) -> &str;

    fn model(&self) -> &str;

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;
}

/// Build the client described by `config`.
pub fn create_llm_client(config: &LlmConfig) -> Result<Arc<dyn LlmClient>, LlmError> {
    let client: Arc<dyn LlmClient> = match config.provider {
        LlmProvider::Anthropic => Arc::new(AnthropicClient::from_config(config)?),
        LlmProvider::Ollama => Arc::new(OllamaClient::from_config(config)?),
    };
    Ok(client)
}

fn http_client(timeout: Duration) -> Result<reqwest::Client, LlmError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LlmError::Http(e.to_string()))
}

fn send_error(error: reqwest::Error, timeout: Duration) -> LlmError {
    if error.is_timeout() {
        LlmError::Timeout(timeout)
    } else {
        LlmError::Http(error.to_string())
    }
}

// ============================================================================
// Anthropic Implementation
// ============================================================================

/// Anthropic Messages API client.
pub struct AnthropicClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    api_base: String,
    timeout: Duration,
}

impl AnthropicClient {
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        Ok(Self {
            client: http_client(timeout)?,
            api_key: config.api_key.clone().unwrap_or_default(),
            model: config.model.clone(),
            api_base: config
                .api_base
                .clone()
                .unwrap_or_else(|| ANTHROPIC_API_BASE.to_string()),
            timeout,
        })
    }
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<AnthropicMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContent>,
    model: String,
    usage: AnthropicUsage,
}

#[derive(Debug, Deserialize)]
struct AnthropicContent {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorDetail,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorDetail {
    message: String,
}

fn parse_anthropic_response(body: &str) -> Result<CompletionResponse, LlmError> {
    let response: AnthropicResponse =
        serde_json::from_str(body).map_err(|e| LlmError::Json(e.to_string()))?;

    let text = response
        .content
        .into_iter()
        .filter(|c| c.content_type == "text")
        .map(|c| c.text)
        .collect::<Vec<_>>()
        .join("");

    Ok(CompletionResponse {
        text,
        usage: LlmUsage {
            input_tokens: response.usage.input_tokens,
            output_tokens: response.usage.output_tokens,
        },
        model: response.model,
    })
}

#[async_trait]
impl LlmClient for AnthropicClient {
    fn provider(&self) -> &str {
        LlmProvider::Anthropic.as_str()
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = AnthropicRequest {
            model: &self.model,
            max_tokens: request.max_tokens,
            system: request.system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: request.prompt,
            }],
            temperature: request.temperature,
        };

        let mut builder = self
            .client
            .post(format!("{}/v1/messages", self.api_base))
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body);
        if !self.api_key.is_empty() {
            builder = builder.header("x-api-key", &self.api_key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| send_error(e, self.timeout))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| send_error(e, self.timeout))?;

        if status != 200 {
            let message = serde_json::from_str::<AnthropicError>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(LlmError::Api { status, message });
        }

        parse_anthropic_response(&text)
    }
}

// ============================================================================
// Ollama Implementation
// ============================================================================

/// Ollama client for local inference. No API key required.
pub struct OllamaClient {
    client: reqwest::Client,
    model: String,
    api_base: String,
    timeout: Duration,
}

impl OllamaClient {
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        Ok(Self {
            client: http_client(timeout)?,
            model: config.model.clone(),
            api_base: config
                .api_base
                .clone()
                .unwrap_or_else(|| OLLAMA_API_BASE.to_string()),
            timeout,
        })
    }
}

#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    model: String,
    response: String,
    /// Tokens in the response.
    #[serde(default)]
    eval_count: u32,
    /// Tokens in the prompt.
    #[serde(default)]
    prompt_eval_count: u32,
}

#[derive(Debug, Deserialize)]
struct OllamaErrorResponse {
    error: String,
}

fn parse_ollama_response(body: &str) -> Result<CompletionResponse, LlmError> {
    let response: OllamaResponse =
        serde_json::from_str(body).map_err(|e| LlmError::Json(e.to_string()))?;
    Ok(CompletionResponse {
        text: response.response,
        usage: LlmUsage {
            input_tokens: response.prompt_eval_count,
            output_tokens: response.eval_count,
        },
        model: response.model,
    })
}

#[async_trait]
impl LlmClient for OllamaClient {
    fn provider(&self) -> &str {
        LlmProvider::Ollama.as_str()
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = OllamaRequest {
            model: &self.model,
            prompt: request.prompt,
            system: request.system,
            stream: false,
            options: OllamaOptions {
                temperature: request.temperature,
                num_predict: request.max_tokens,
            },
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.api_base))
            .json(&body)
            .send()
            .await
            .map_err(|e| send_error(e, self.timeout))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| send_error(e, self.timeout))?;

        if status != 200 {
            let message = serde_json::from_str::<OllamaErrorResponse>(&text)
                .map(|e| e.error)
                .unwrap_or(text);
            return Err(LlmError::Api { status, message });
        }

        parse_ollama_response(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_request_builder() {
        let request = CompletionRequest::new("Analyse this deck")
            .with_system("You are a Commander expert")
            .with_max_tokens(500)
            .with_temperature(0.2);

        assert_eq!(request.prompt, "Analyse this deck");
        assert_eq!(request.system.as_deref(), Some("You are a Commander expert"));
        assert_eq!(request.max_tokens, 500);
        assert_eq!(request.temperature, 0.2);
    }

    #[test]
    fn test_parse_anthropic_response_joins_text_blocks() {
        let body = r#"{
            "content": [
                {"type": "text", "text": "Bracket 3 "},
                {"type": "tool_use", "id": "x", "name": "n", "input": {}},
                {"type": "text", "text": "deck."}
            ],
            "model": "claude-sonnet-4-5",
            "usage": {"input_tokens": 120, "output_tokens": 8}
        }"#;
        let response = parse_anthropic_response(body).unwrap();
        assert_eq!(response.text, "Bracket 3 deck.");
        assert_eq!(response.usage.input_tokens, 120);
        assert_eq!(response.model, "claude-sonnet-4-5");
    }

    #[test]
    fn test_parse_ollama_response() {
        let body = r#"{"model": "llama3", "response": "Solid deck.", "done": true, "eval_count": 4, "prompt_eval_count": 50}"#;
        let response = parse_ollama_response(body).unwrap();
        assert_eq!(response.text, "Solid deck.");
        assert_eq!(response.usage.output_tokens, 4);
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(parse_ollama_response("nope"), Err(LlmError::Json(_))));
    }

    #[test]
    fn test_create_client_by_provider() {
        let config = LlmConfig::new(LlmProvider::Ollama, "llama3");
        let client = create_llm_client(&config).unwrap();
        assert_eq!(client.provider(), "ollama");
        assert_eq!(client.model(), "llama3");

        let config = LlmConfig::new(LlmProvider::Anthropic, "claude-sonnet-4-5").with_api_key("sk-test");
        let client = create_llm_client(&config).unwrap();
        assert_eq!(client.provider(), "anthropic");
    }
}
