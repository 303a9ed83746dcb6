//! Error types for the Park Guide domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each boundary (completion API, hours source, assistant) has its own enum.

use thiserror::Error;

/// The top-level error type for Park Guide operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Live info error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Assistant error: {0}")]
    Assistant(#[from] AssistantError),
}

/// Failures of the external completion API.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Network error: {0}")]
    Network(String),
}

/// Failures of the live-hours fetch. Every variant is recovered by the
/// fetcher with the fallback value; none reaches a page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Hours page request timed out after {0}s")]
    Timeout(u64),

    #[error("Hours page request failed: {0}")]
    Network(String),

    #[error("Hours page returned status {0}")]
    Status(u16),

    #[error("Failed to read hours page body: {0}")]
    Body(String),

    #[error("No hours entry for {0}")]
    EntryNotFound(String),

    #[error("Hours entry is missing the '{0}' field")]
    MissingField(&'static str),
}

/// Errors surfaced by the assistant surface before any completion call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssistantError {
    #[error("Question must not be empty")]
    EmptyQuestion,

    #[error("A response is already being generated for this session")]
    Busy,

    #[error("AI assistant is unavailable: no API key configured")]
    Unavailable,

    #[error("Session not found: {0}")]
    SessionNotFound(String),
}
