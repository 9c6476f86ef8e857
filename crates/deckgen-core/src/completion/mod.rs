//! Completion-service interface.
//!
//! The planner talks to the language model through the [`CompletionClient`]
//! trait so tests can substitute a scripted client. [`OpenAiClient`] is the
//! production adapter for OpenAI-compatible chat endpoints.
//!
//! ```text
//! Planner --complete(request)--> &dyn CompletionClient --> reply text
//! ```

pub mod openai;

use async_trait::async_trait;
use thiserror::Error;

pub use openai::OpenAiClient;

/// A single system + user prompt exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub temperature: f32,
    pub system: String,
    pub user: String,
}

/// Errors from the completion service. None of these are retried.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion API key not set (export OPENAI_API_KEY)")]
    MissingApiKey,

    #[error("completion request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("completion service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("completion service returned no choices")]
    EmptyResponse,
}

/// Adapter interface for text-completion services.
///
/// Object-safe so the planner can hold a `Box<dyn CompletionClient>`.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Human-readable name for logs (e.g. "openai").
    fn name(&self) -> &str;

    /// Send one request and return the reply text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}

// Compile-time assertion: CompletionClient must be object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn CompletionClient) {}
};
