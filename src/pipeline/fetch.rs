//! Source page fetch: retrieve the raw recipe webpage.
//!
//! Deliberately dumb — no HTML parsing, no readability extraction. The raw
//! document body goes straight to the language model, which is far better at
//! finding the recipe inside a soup of ads and scripts than any selector
//! heuristic we could maintain here.

use crate::error::RecipeImportError;
use tracing::{debug, info};

/// Check whether the input string looks like a fetchable URL.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Validate the user-supplied URL before any network call.
pub fn validate_url(url: &str) -> Result<(), RecipeImportError> {
    if url.trim().is_empty() {
        return Err(RecipeImportError::InvalidUrl {
            url: url.to_string(),
            reason: "URL is empty".into(),
        });
    }
    if !is_url(url) {
        return Err(RecipeImportError::InvalidUrl {
            url: url.to_string(),
            reason: "expected an http:// or https:// URL".into(),
        });
    }
    reqwest::Url::parse(url)
        .map_err(|e| RecipeImportError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })
        .map(|_| ())
}

/// Fetch the recipe page and return its body as text.
///
/// Single attempt, no retry: a recipe import is interactive and the caller
/// would rather get a fast failure than wait through a backoff schedule.
pub async fn fetch_page(url: &str, timeout_secs: u64) -> Result<String, RecipeImportError> {
    validate_url(url)?;
    info!("Fetching recipe page: {}", url);

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| RecipeImportError::FetchFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            RecipeImportError::FetchTimeout {
                url: url.to_string(),
                secs: timeout_secs,
            }
        } else {
            RecipeImportError::FetchFailed {
                url: url.to_string(),
                reason: e.to_string(),
            }
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(RecipeImportError::FetchStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| RecipeImportError::FetchFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    debug!("Fetched {} bytes from {}", body.len(), url);
    Ok(body)
}
