//! Recipe extraction: one Anthropic Messages API call per import.
//!
//! This module is intentionally thin — all prompt engineering lives in
//! [`crate::prompts`] so the markdown convention can change without touching
//! transport or reply-parsing logic here.
//!
//! ## Reply handling
//!
//! The prompt demands bare JSON, but models occasionally wrap the reply in
//! code fences anyway. The parser strips one outer fence pair
//! before deserialising, then requires a strict `{name, content}` object;
//! anything else is an extraction error. There is no retry — the model call
//! is the expensive stage and the caller decides whether to try again.

use crate::config::ImportConfig;
use crate::error::RecipeImportError;
use crate::prompts::extraction_prompt;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Instant;
use tracing::{debug, info};

const ANTHROPIC_MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// The structured recipe record the model must produce.
///
/// Extra fields in the reply are ignored: a record that carries both `name`
/// and `content` is usable no matter what else the model volunteered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedRecipe {
    /// Recipe name, used as the Notion page title.
    pub name: String,
    /// Markdown body following the fixed section convention.
    pub content: String,
}

/// A successful extraction plus its token usage.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    pub recipe: ExtractedRecipe,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

// Response shapes for the Messages API; only the fields we read.
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentPart>,
    #[serde(default)]
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Default, Deserialize)]
struct Usage {
    #[serde(default)]
    input_tokens: u64,
    #[serde(default)]
    output_tokens: u64,
}

/// Extract a recipe record from fetched page text.
pub async fn extract_recipe(
    page_text: &str,
    source_url: &str,
    config: &ImportConfig,
) -> Result<ExtractionResult, RecipeImportError> {
    let start = Instant::now();
    let page_text = truncate_at_char_boundary(page_text, config.max_page_bytes);
    let prompt = extraction_prompt(page_text, source_url);

    info!("Extracting recipe with model {}", config.model);

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.api_timeout_secs))
        .build()
        .map_err(|e| RecipeImportError::LlmApi {
            reason: e.to_string(),
        })?;

    let body = json!({
        "model": config.model,
        "max_tokens": config.max_tokens,
        "messages": [{ "role": "user", "content": prompt }],
    });

    let response = client
        .post(ANTHROPIC_MESSAGES_URL)
        .header("x-api-key", &config.anthropic_api_key)
        .header("anthropic-version", ANTHROPIC_VERSION)
        .json(&body)
        .send()
        .await
        .map_err(|e| RecipeImportError::LlmApi {
            reason: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        let detail = response.text().await.unwrap_or_default();
        return Err(RecipeImportError::LlmStatus {
            status: status.as_u16(),
            detail,
        });
    }

    let reply: MessagesResponse =
        response
            .json()
            .await
            .map_err(|e| RecipeImportError::MalformedReply {
                detail: format!("unreadable API response: {e}"),
            })?;

    let text = reply
        .content
        .iter()
        .filter(|part| part.kind == "text")
        .map(|part| part.text.as_str())
        .collect::<String>();

    if text.trim().is_empty() {
        return Err(RecipeImportError::EmptyReply);
    }

    let recipe = parse_recipe_reply(&text)?;

    debug!(
        "Extracted '{}' in {:?} ({} in / {} out tokens)",
        recipe.name,
        start.elapsed(),
        reply.usage.input_tokens,
        reply.usage.output_tokens
    );

    Ok(ExtractionResult {
        recipe,
        input_tokens: reply.usage.input_tokens,
        output_tokens: reply.usage.output_tokens,
    })
}

// Models sometimes disobey the bare-JSON instruction and fence the reply.
static RE_OUTER_FENCES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^```(?:json)?\n(.*)\n```\s*$").unwrap());

/// Strip one outer ```/```json fence pair, if present.
fn strip_reply_fences(reply: &str) -> String {
    let trimmed = reply.trim();
    if let Some(caps) = RE_OUTER_FENCES.captures(trimmed) {
        caps[1].to_string()
    } else {
        trimmed.to_string()
    }
}

/// Parse the model's reply text into a strict `{name, content}` record.
pub fn parse_recipe_reply(reply: &str) -> Result<ExtractedRecipe, RecipeImportError> {
    let cleaned = strip_reply_fences(reply);
    serde_json::from_str(&cleaned).map_err(|e| RecipeImportError::MalformedReply {
        detail: e.to_string(),
    })
}

/// Truncate to at most `max_bytes`, backing off to a char boundary.
fn truncate_at_char_boundary(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
