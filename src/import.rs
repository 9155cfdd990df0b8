//! Eager import entry points.
//!
//! One call runs the whole pipeline: fetch the page, extract the recipe
//! record, convert its markdown to blocks, publish the Notion page. Stages
//! run sequentially with a single attempt each; the first failure aborts the
//! import and propagates as a [`RecipeImportError`]. Because the Notion page
//! is created in the final stage only, a failed import never leaves a
//! partially written page behind.

use crate::config::ImportConfig;
use crate::error::RecipeImportError;
use crate::pipeline::{blocks, extract, fetch, publish};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

/// The result of a successful import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportOutput {
    /// Recipe name extracted by the model, used as the page title.
    pub recipe_name: String,
    /// URL of the created Notion page.
    pub page_url: String,
    /// Number of content blocks written to the page.
    pub block_count: usize,
    /// Per-stage timings and token usage.
    pub stats: ImportStats,
}

/// Timing and token-usage statistics for one import.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportStats {
    pub fetch_ms: u64,
    pub extract_ms: u64,
    pub publish_ms: u64,
    pub total_ms: u64,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// Import a recipe webpage into Notion.
///
/// This is the primary entry point for the library.
///
/// # Arguments
/// * `url` — HTTP/HTTPS URL of the recipe page
/// * `config` — import configuration (credentials, model, timeouts)
///
/// # Errors
/// Any stage failure aborts the import: invalid URL, unreachable page,
/// unusable model reply, or a rejected Notion call. See
/// [`RecipeImportError::category`] for the failure taxonomy.
pub async fn import_recipe(
    url: impl AsRef<str>,
    config: &ImportConfig,
) -> Result<ImportOutput, RecipeImportError> {
    let total_start = Instant::now();
    let url = url.as_ref();
    info!("Starting recipe import: {}", url);

    // ── Step 1: Fetch the recipe webpage ─────────────────────────────────
    let fetch_start = Instant::now();
    let page_text = fetch::fetch_page(url, config.fetch_timeout_secs).await?;
    let fetch_ms = fetch_start.elapsed().as_millis() as u64;

    // ── Step 2: Extract the recipe record ────────────────────────────────
    let extract_start = Instant::now();
    let extraction = extract::extract_recipe(&page_text, url, config).await?;
    let extract_ms = extract_start.elapsed().as_millis() as u64;

    // ── Step 3: Convert markdown to blocks (pure, cannot fail) ───────────
    let converted = blocks::convert_blocks(&extraction.recipe.content);

    // ── Step 4: Create the Notion page ───────────────────────────────────
    let publish_start = Instant::now();
    let page_url = publish::publish_recipe(&extraction.recipe.name, &converted, config).await?;
    let publish_ms = publish_start.elapsed().as_millis() as u64;

    let stats = ImportStats {
        fetch_ms,
        extract_ms,
        publish_ms,
        total_ms: total_start.elapsed().as_millis() as u64,
        input_tokens: extraction.input_tokens,
        output_tokens: extraction.output_tokens,
    };

    info!(
        "Imported '{}' ({} blocks) in {}ms",
        extraction.recipe.name,
        converted.len(),
        stats.total_ms
    );

    Ok(ImportOutput {
        recipe_name: extraction.recipe.name,
        page_url,
        block_count: converted.len(),
        stats,
    })
}

/// Synchronous wrapper around [`import_recipe`].
///
/// Creates a temporary tokio runtime internally.
pub fn import_recipe_sync(
    url: impl AsRef<str>,
    config: &ImportConfig,
) -> Result<ImportOutput, RecipeImportError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| RecipeImportError::Internal(format!("Failed to create tokio runtime: {e}")))?
        .block_on(import_recipe(url, config))
}
