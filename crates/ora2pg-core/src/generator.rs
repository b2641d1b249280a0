//! External text-generation collaborator.
//!
//! The hosted model is treated as an opaque service: prompt text goes in,
//! text comes out. Implementations are constructed once and injected into the
//! orchestrators, which keeps them testable with a scripted fake.

use std::time::Duration;
use thiserror::Error;

/// A single-turn generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Model identifier (e.g. `gemini-2.5-flash`)
    pub model: String,
    /// User prompt text
    pub prompt: String,
    /// System instruction sent alongside the prompt
    pub system_instruction: Option<String>,
    /// Thinking token budget hint
    pub thinking_budget: Option<u32>,
    /// Requested response MIME type (e.g. `text/plain`)
    pub response_mime_type: Option<String>,
}

impl GenerationRequest {
    /// Creates a request with no special configuration.
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            system_instruction: None,
            thinking_budget: None,
            response_mime_type: None,
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn with_thinking_budget(mut self, budget: u32) -> Self {
        self.thinking_budget = Some(budget);
        self
    }

    pub fn with_response_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.response_mime_type = Some(mime_type.into());
        self
    }
}

/// Failures reported by a [`TextGenerator`].
///
/// `is_retryable` is informational; nothing in the application retries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// The request never produced an HTTP response
    #[error("Request failed: {message}")]
    Transport { message: String, is_retryable: bool },

    /// The service answered with a non-success status
    #[error("API error ({status_code}): {message}")]
    Api {
        status_code: u16,
        message: String,
        is_retryable: bool,
        retry_after: Option<Duration>,
    },

    /// The service answered without any text
    #[error("The service returned no text")]
    EmptyResponse,

    /// The response body could not be decoded
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl GenerationError {
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { is_retryable, .. } | Self::Api { is_retryable, .. } => *is_retryable,
            Self::EmptyResponse | Self::MalformedResponse(_) => false,
        }
    }
}

/// Hosted text-generation service.
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    /// Sends one prompt and returns the generated text.
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_optional_fields() {
        let request = GenerationRequest::new("gemini-3-pro-preview", "convert this")
            .with_system_instruction("be precise")
            .with_thinking_budget(2048)
            .with_response_mime_type("text/plain");

        assert_eq!(request.model, "gemini-3-pro-preview");
        assert_eq!(request.system_instruction.as_deref(), Some("be precise"));
        assert_eq!(request.thinking_budget, Some(2048));
        assert_eq!(request.response_mime_type.as_deref(), Some("text/plain"));
    }

    #[test]
    fn test_plain_request_has_no_configuration() {
        let request = GenerationRequest::new("gemini-2.5-flash", "compare");
        assert!(request.system_instruction.is_none());
        assert!(request.thinking_budget.is_none());
        assert!(request.response_mime_type.is_none());
    }

    #[test]
    fn test_retryability() {
        let err = GenerationError::Api {
            status_code: 503,
            message: "UNAVAILABLE".into(),
            is_retryable: true,
            retry_after: None,
        };
        assert!(err.is_retryable());
        assert!(!GenerationError::EmptyResponse.is_retryable());
    }
}
