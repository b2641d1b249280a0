//! Secret management service trait.
//!
//! Defines the interface for resolving the API key of the hosted model.

/// Service for resolving API credentials.
///
/// # Security Note
///
/// Implementations must never log the key or include it in error messages.
#[async_trait::async_trait]
pub trait SecretService: Send + Sync {
    /// Returns the Gemini API key, or `None` when no source provides one.
    ///
    /// A missing key is not an error here: requests are still issued and the
    /// service rejects them.
    async fn gemini_api_key(&self) -> Option<String>;
}
