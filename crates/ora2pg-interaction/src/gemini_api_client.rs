//! GeminiApiClient - Direct REST API implementation for Gemini.
//!
//! Implements [`TextGenerator`] with a single `generateContent` call per
//! request. No retries and no local timeout: the transport defaults apply.

use async_trait::async_trait;
use ora2pg_core::config::DEFAULT_GEMINI_BASE_URL;
use ora2pg_core::generator::{GenerationError, GenerationRequest, TextGenerator};
use reqwest::{Client, StatusCode, header::HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Client for the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiApiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiApiClient {
    /// Creates a client with the provided API key.
    ///
    /// The key is not validated; an empty key makes every request fail at
    /// the service.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
        }
    }

    /// Replaces the underlying HTTP client.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Overrides the models endpoint (e.g. for a proxy).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/{model}:generateContent?key={api_key}",
            self.base_url,
            model = model,
            api_key = self.api_key
        )
    }

    async fn send_request(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> Result<String, GenerationError> {
        let response = self
            .client
            .post(self.endpoint(model))
            .json(body)
            .send()
            .await
            .map_err(|err| {
                let is_retryable = err.is_connect() || err.is_timeout();
                // without_url keeps the key out of the message
                GenerationError::Transport {
                    message: format!("Gemini API request failed: {}", err.without_url()),
                    is_retryable,
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text, retry_after));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|err| {
            GenerationError::MalformedResponse(format!(
                "Failed to parse Gemini response: {}",
                err.without_url()
            ))
        })?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl TextGenerator for GeminiApiClient {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        let model = request.model.clone();
        let body = GenerateContentRequest::from(request);

        tracing::info!(
            "[GeminiApiClient] generateContent model={} prompt_chars={}",
            model,
            body.prompt_chars()
        );

        self.send_request(&model, &body).await
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    fn prompt_chars(&self) -> usize {
        self.contents
            .iter()
            .flat_map(|content| content.parts.iter())
            .map(|part| part.text.chars().count())
            .sum()
    }
}

impl From<GenerationRequest> for GenerateContentRequest {
    fn from(request: GenerationRequest) -> Self {
        let system_instruction = request.system_instruction.map(|text| Content {
            role: None,
            parts: vec![Part { text }],
        });

        let generation_config =
            if request.response_mime_type.is_some() || request.thinking_budget.is_some() {
                Some(GenerationConfig {
                    response_mime_type: request.response_mime_type,
                    thinking_config: request.thinking_budget.map(|thinking_budget| {
                        ThinkingConfig { thinking_budget }
                    }),
                })
            } else {
                None
            };

        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: request.prompt,
                }],
            }],
            system_instruction,
            generation_config,
        }
    }
}

#[derive(Serialize, Debug)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Serialize, Debug)]
struct Part {
    text: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<ThinkingConfig>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// Joins the non-thought text parts of the first candidate.
fn extract_text_response(response: GenerateContentResponse) -> Result<String, GenerationError> {
    let text: String = response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter(|part| !part.thought)
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.is_empty() {
        Err(GenerationError::EmptyResponse)
    } else {
        Ok(text)
    }
}

fn map_http_error(status: StatusCode, body: String, retry_after: Option<Duration>) -> GenerationError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    let is_retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    GenerationError::Api {
        status_code: status.as_u16(),
        message,
        is_retryable,
        retry_after,
    }
}

fn parse_retry_after(header: Option<&HeaderValue>) -> Option<Duration> {
    let value = header?.to_str().ok()?;
    // HTTP-date form is not supported
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_translation_request_body() {
        let request = GenerationRequest::new("gemini-3-pro-preview", "MIGRATION TYPE: SCHEMA")
            .with_system_instruction("You are an expert")
            .with_thinking_budget(2048)
            .with_response_mime_type("text/plain");

        let body = serde_json::to_value(GenerateContentRequest::from(request)).unwrap();

        assert_eq!(
            body,
            json!({
                "contents": [{"role": "user", "parts": [{"text": "MIGRATION TYPE: SCHEMA"}]}],
                "systemInstruction": {"parts": [{"text": "You are an expert"}]},
                "generationConfig": {
                    "responseMimeType": "text/plain",
                    "thinkingConfig": {"thinkingBudget": 2048}
                }
            })
        );
    }

    #[test]
    fn test_plain_request_body_has_no_config() {
        let request = GenerationRequest::new("gemini-2.5-flash", "Compare");
        let body = serde_json::to_value(GenerateContentRequest::from(request)).unwrap();

        assert_eq!(
            body,
            json!({"contents": [{"role": "user", "parts": [{"text": "Compare"}]}]})
        );
    }

    #[test]
    fn test_extract_text_skips_thoughts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"parts": [
                    {"text": "planning...", "thought": true},
                    {"text": "CREATE TABLE t ("},
                    {"text": "id INTEGER);"}
                ]}
            }]
        }))
        .unwrap();

        assert_eq!(
            extract_text_response(response).unwrap(),
            "CREATE TABLE t (id INTEGER);"
        );
    }

    #[test]
    fn test_extract_text_without_candidates() {
        let response: GenerateContentResponse =
            serde_json::from_value(json!({"candidates": []})).unwrap();
        assert_eq!(
            extract_text_response(response).unwrap_err(),
            GenerationError::EmptyResponse
        );
    }

    #[test]
    fn test_map_http_error_reads_google_envelope() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}}"#;
        let err = map_http_error(StatusCode::BAD_REQUEST, body.to_string(), None);

        assert_eq!(
            err,
            GenerationError::Api {
                status_code: 400,
                message: "INVALID_ARGUMENT: API key not valid.".to_string(),
                is_retryable: false,
                retry_after: None,
            }
        );
    }

    #[test]
    fn test_map_http_error_retryable_with_raw_body() {
        let err = map_http_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "upstream down".to_string(),
            Some(Duration::from_secs(5)),
        );
        assert!(err.is_retryable());
        assert!(err.to_string().contains("upstream down"));
    }

    #[test]
    fn test_parse_retry_after() {
        let seconds = HeaderValue::from_static("30");
        assert_eq!(parse_retry_after(Some(&seconds)), Some(Duration::from_secs(30)));

        let date = HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT");
        assert_eq!(parse_retry_after(Some(&date)), None);
        assert_eq!(parse_retry_after(None), None);
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = GeminiApiClient::new("k").with_base_url("http://localhost:9000/models/");
        assert_eq!(
            client.endpoint("gemini-2.5-flash"),
            "http://localhost:9000/models/gemini-2.5-flash:generateContent?key=k"
        );
    }
}
