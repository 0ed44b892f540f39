//! Error types for providers and the knowledge base.

use thiserror::Error;

/// Result type for provider calls.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors a text provider can report. All of them are recoverable: the
/// enricher moves on to the next provider or to templates.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No API key is configured for the provider.
    #[error("no api key configured for {0}")]
    MissingApiKey(String),

    /// The request did not complete within the timeout.
    #[error("{provider} timed out after {secs}s")]
    Timeout {
        /// Provider name.
        provider: String,
        /// Timeout in seconds.
        secs: u64,
    },

    /// Transport-level failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{provider} returned status {status}: {body}")]
    Status {
        /// Provider name.
        provider: String,
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        body: String,
    },

    /// The reply carried no text.
    #[error("{0} returned an empty reply")]
    EmptyResponse(String),

    /// The reply could not be decoded.
    #[error("malformed reply from {provider}: {message}")]
    MalformedResponse {
        /// Provider name.
        provider: String,
        /// What was wrong.
        message: String,
    },
}

/// Result type for knowledge-base loading.
pub type KnowledgeResult<T> = Result<T, KnowledgeError>;

/// Errors loading a knowledge base.
#[derive(Debug, Error)]
pub enum KnowledgeError {
    /// The file could not be read.
    #[error("failed to read knowledge base: {0}")]
    Io(#[from] std::io::Error),

    /// A line was not a valid record.
    #[error("invalid record on line {line}: {source}")]
    Json {
        /// One-based line number.
        line: usize,
        /// Parser error.
        source: serde_json::Error,
    },
}
