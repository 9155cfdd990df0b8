//! # recipe2notion
//!
//! Import recipe webpages into Notion using an LLM extractor.
//!
//! ## Why this crate?
//!
//! Recipe sites bury a handful of ingredients and steps under ads, scripts,
//! and life stories. Scraping them with CSS selectors breaks weekly. Instead
//! this crate hands the raw page to a language model with a fixed output
//! convention, then deterministically converts the model's markdown into
//! Notion blocks — the model does the messy reading, the code does the
//! exact formatting.
//!
//! ## Pipeline Overview
//!
//! ```text
//! URL
//!  │
//!  ├─ 1. Fetch    download the recipe webpage
//!  ├─ 2. Extract  one Anthropic call → {name, content} markdown record
//!  ├─ 3. Convert  markdown → heading/paragraph/list blocks (pure, total)
//!  └─ 4. Publish  POST /v1/pages → new Notion page under the parent
//! ```
//!
//! Stages run sequentially, one attempt each, fail-fast. The page is created
//! last, so a failed import never leaves a half-written page.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use recipe2notion::{import_recipe, ImportConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads ANTHROPIC_API_KEY, NOTION_API_KEY, NOTION_PARENT_PAGE_ID
//!     let config = ImportConfig::from_env()?;
//!     let output = import_recipe("https://example.com/best-apple-pie", &config).await?;
//!     println!("{} → {}", output.recipe_name, output.page_url);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `recipe2notion` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! recipe2notion = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod handler;
pub mod import;
pub mod pipeline;
pub mod prompts;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ImportConfig, ImportConfigBuilder, DEFAULT_MODEL, NOTION_VERSION};
pub use error::{ErrorCategory, RecipeImportError};
pub use handler::{handle, ImportRequest, ImportResponse};
pub use import::{import_recipe, import_recipe_sync, ImportOutput, ImportStats};
pub use pipeline::blocks::{convert_blocks, Block};
pub use pipeline::extract::ExtractedRecipe;
