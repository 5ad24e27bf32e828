//! OpenAI-compatible chat-completions generator
//!
//! Sends the exam prompt to `{base_url}/chat/completions` and returns the
//! first choice's message content verbatim. Any service that speaks this
//! API (OpenAI, DeepSeek, local servers) works.

use crate::config::{ApiCredentials, FileApiConfig};
use async_trait::async_trait;
use mock_exam_application::{ExamGenerator, GenerationError};
use mock_exam_domain::core::string::truncate;
use mock_exam_domain::{ExamPromptTemplate, GenerationRequest};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Request tuning that is not part of the credentials.
#[derive(Debug, Clone, Copy)]
pub struct GenerationSettings {
    pub temperature: f32,
    pub timeout: Duration,
}

impl From<&FileApiConfig> for GenerationSettings {
    fn from(config: &FileApiConfig) -> Self {
        Self {
            temperature: config.temperature,
            timeout: config.timeout(),
        }
    }
}

/// [`ExamGenerator`] backed by an OpenAI-compatible HTTP API.
pub struct OpenAiExamGenerator {
    client: Client,
    credentials: ApiCredentials,
    settings: GenerationSettings,
}

impl OpenAiExamGenerator {
    pub fn new(credentials: ApiCredentials, settings: GenerationSettings) -> Self {
        Self {
            client: Client::new(),
            credentials,
            settings,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.credentials.base_url.trim_end_matches('/')
        )
    }

    fn payload(&self, request: &GenerationRequest) -> ChatRequest {
        ChatRequest {
            model: self.credentials.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: ExamPromptTemplate::system().to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: ExamPromptTemplate::generation_prompt(request),
                },
            ],
            temperature: self.settings.temperature,
        }
    }
}

#[async_trait]
impl ExamGenerator for OpenAiExamGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        if self.credentials.api_key.trim().is_empty() {
            return Err(GenerationError::NotConfigured(
                "API key is empty".to_string(),
            ));
        }

        let url = self.endpoint();
        info!("Requesting exam from {} ({})", url, self.credentials.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.credentials.api_key)
            .timeout(self.settings.timeout)
            .json(&self.payload(request))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::RequestFailed(format!(
                "HTTP {}: {}",
                status,
                truncate(&body, 200)
            )));
        }

        let body: ChatResponse = response.json().await.map_err(map_transport_error)?;
        let content = first_content(body)?;
        debug!("Received {} bytes of exam text", content.len());
        Ok(content)
    }
}

fn map_transport_error(e: reqwest::Error) -> GenerationError {
    if e.is_timeout() {
        GenerationError::Timeout
    } else if e.is_connect() {
        GenerationError::ConnectionError(e.to_string())
    } else {
        GenerationError::RequestFailed(e.to_string())
    }
}

fn first_content(body: ChatResponse) -> Result<String, GenerationError> {
    body.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(GenerationError::EmptyResponse)
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mock_exam_domain::ExamKind;

    fn generator(base_url: &str, api_key: &str) -> OpenAiExamGenerator {
        OpenAiExamGenerator::new(
            ApiCredentials {
                api_key: api_key.to_string(),
                base_url: base_url.to_string(),
                model: "deepseek-chat".to_string(),
            },
            GenerationSettings::from(&FileApiConfig::default()),
        )
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        assert_eq!(
            generator("https://api.deepseek.com/v1/", "k").endpoint(),
            "https://api.deepseek.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_payload_carries_both_prompts() {
        let request = GenerationRequest::new(
            ExamKind::Jlpt,
            ExamKind::Jlpt.parse_level("n2").unwrap(),
        );
        let payload = serde_json::to_value(generator("http://x", "k").payload(&request)).unwrap();

        assert_eq!(payload["model"], "deepseek-chat");
        assert_eq!(payload["messages"][0]["role"], "system");
        assert_eq!(payload["messages"][1]["role"], "user");
        assert!(
            payload["messages"][1]["content"]
                .as_str()
                .unwrap()
                .contains("N2")
        );
        assert!((payload["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_first_content() {
        let body: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"[{}]"}}]}"#,
        )
        .unwrap();
        assert_eq!(first_content(body).unwrap(), "[{}]");
    }

    #[test]
    fn test_missing_content_is_empty_response() {
        let body: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(
            first_content(body),
            Err(GenerationError::EmptyResponse)
        ));

        let body: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();
        assert!(matches!(
            first_content(body),
            Err(GenerationError::EmptyResponse)
        ));
    }

    #[tokio::test]
    async fn test_blank_key_is_not_configured() {
        let request = GenerationRequest::new(
            ExamKind::Jpt,
            ExamKind::Jpt.parse_level("650").unwrap(),
        );
        let result = generator("http://127.0.0.1:9", " ").generate(&request).await;
        assert!(matches!(result, Err(GenerationError::NotConfigured(_))));
    }
}
