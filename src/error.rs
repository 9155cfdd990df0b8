//! Error types for the recipe2notion library.
//!
//! Every stage failure surfaces as one flat [`RecipeImportError`]. Variants
//! are grouped by pipeline stage; [`RecipeImportError::category`] maps each
//! variant onto the machine-readable categories callers report back to
//! clients (`invalid_request`, `network_error`, `extraction_error`,
//! `publish_error`, plus `internal_error` for process-level failures that
//! belong to no stage).
//!
//! The pipeline is fail-fast: the first stage error aborts the import and no
//! Notion page is created, so there is never partial state to clean up.

use thiserror::Error;

/// Machine-readable error category, one per pipeline failure class.
///
/// This is the stable vocabulary of the request/response operation; the
/// variant messages in [`RecipeImportError`] carry the human-readable detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Missing or malformed input, wrong request method, bad configuration.
    InvalidRequest,
    /// The source recipe page could not be fetched.
    NetworkError,
    /// The language model reply was missing, non-JSON, or the wrong shape.
    ExtractionError,
    /// The Notion API rejected the page creation.
    PublishError,
    /// A failure in the process itself, not in the request or any upstream
    /// service (e.g. the async runtime could not be created).
    Internal,
}

impl ErrorCategory {
    /// Stable string form used in failure response bodies.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::InvalidRequest => "invalid_request",
            ErrorCategory::NetworkError => "network_error",
            ErrorCategory::ExtractionError => "extraction_error",
            ErrorCategory::PublishError => "publish_error",
            ErrorCategory::Internal => "internal_error",
        }
    }
}

/// All errors returned by the recipe2notion library.
#[derive(Debug, Error)]
pub enum RecipeImportError {
    // ── Request / config errors ───────────────────────────────────────────
    /// The input string is not a valid HTTP/HTTPS URL.
    #[error("Invalid recipe URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The request/response operation received a non-POST method.
    #[error("Method '{method}' not allowed; use POST")]
    MethodNotAllowed { method: String },

    /// A required credential is absent from the environment.
    ///
    /// Detected at configuration time, before the first network call, so a
    /// misconfigured deployment never burns a fetch or an LLM call.
    #[error("Missing required credential: set the {var} environment variable")]
    MissingCredential { var: &'static str },

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Fetch errors ──────────────────────────────────────────────────────
    /// The source page request could not be completed.
    #[error("Failed to fetch '{url}': {reason}\nCheck the URL and your internet connection.")]
    FetchFailed { url: String, reason: String },

    /// The source page request exceeded the configured timeout.
    #[error("Fetch timed out after {secs}s for '{url}'\nIncrease --fetch-timeout.")]
    FetchTimeout { url: String, secs: u64 },

    /// The source server answered with a non-success status.
    #[error("Source page '{url}' returned HTTP {status}")]
    FetchStatus { url: String, status: u16 },

    // ── Extraction errors ─────────────────────────────────────────────────
    /// The Anthropic API call itself failed (transport level).
    #[error("LLM API request failed: {reason}")]
    LlmApi { reason: String },

    /// The Anthropic API answered with a non-success status.
    #[error("LLM API returned HTTP {status}: {detail}")]
    LlmStatus { status: u16, detail: String },

    /// The model reply contained no text content at all.
    #[error("LLM reply contained no text content")]
    EmptyReply,

    /// The model reply was not valid JSON of the expected `{name, content}` shape.
    #[error("LLM reply is not a valid recipe record: {detail}")]
    MalformedReply { detail: String },

    // ── Publish errors ────────────────────────────────────────────────────
    /// Notion rejected the API token (401/403).
    #[error("Notion authentication failed: {detail}\nCheck NOTION_API_KEY and the integration's access.")]
    PublishAuth { detail: String },

    /// The configured parent page is unknown or not shared with the integration.
    #[error("Notion parent page '{parent_id}' not found or not shared with the integration")]
    InvalidParent { parent_id: String },

    /// Notion rejected the page payload (malformed blocks, limits).
    #[error("Notion rejected the page payload (HTTP {status}): {detail}")]
    PublishRejected { status: u16, detail: String },

    /// The Notion API call itself failed (transport level).
    #[error("Notion API request failed: {reason}")]
    PublishFailed { reason: String },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected process-level failure unrelated to the request.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RecipeImportError {
    /// The machine-readable category this error reports as.
    pub fn category(&self) -> ErrorCategory {
        use RecipeImportError::*;
        match self {
            InvalidUrl { .. } | MethodNotAllowed { .. } | MissingCredential { .. }
            | InvalidConfig(_) => ErrorCategory::InvalidRequest,
            FetchFailed { .. } | FetchTimeout { .. } | FetchStatus { .. } => {
                ErrorCategory::NetworkError
            }
            LlmApi { .. } | LlmStatus { .. } | EmptyReply | MalformedReply { .. } => {
                ErrorCategory::ExtractionError
            }
            PublishAuth { .. } | InvalidParent { .. } | PublishRejected { .. }
            | PublishFailed { .. } => ErrorCategory::PublishError,
            Internal(_) => ErrorCategory::Internal,
        }
    }
}
