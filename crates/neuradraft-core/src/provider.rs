//! Model provider contract
//!
//! The core treats the language model as an opaque text oracle. Concrete
//! clients (HTTP, local, scripted) live outside this crate.

use thiserror::Error;

/// Errors a model provider can report
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider is not configured (e.g. missing API key)
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    /// Network or transport failure
    #[error("Request failed: {0}")]
    Request(String),

    /// The provider answered with an error status
    #[error("Provider error ({status}): {message}")]
    Status {
        status: u16,
        message: String,
    },

    /// The response could not be interpreted
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The provider returned no text
    #[error("Provider returned an empty response")]
    Empty,
}

/// Text generation oracle
pub trait ModelProvider {
    /// Human-readable provider name, used in logs
    fn name(&self) -> &str;

    /// Generate text from a system prompt and a user prompt
    fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, ProviderError>;
}

impl<P: ModelProvider + ?Sized> ModelProvider for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, ProviderError> {
        (**self).generate(system_prompt, user_prompt)
    }
}
