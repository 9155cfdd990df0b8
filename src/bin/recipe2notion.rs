//! CLI binary for recipe2notion.
//!
//! A thin shim over the library crate that maps CLI flags to `ImportConfig`
//! and prints the result.

use anyhow::{Context, Result};
use clap::Parser;
use recipe2notion::{import_recipe, ImportConfig};
use std::io;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Import a recipe page into Notion
  recipe2notion https://cooking.example.com/best-apple-pie

  # Structured JSON output (for scripting)
  recipe2notion --json https://cooking.example.com/best-apple-pie

  # Use a specific model
  recipe2notion --model claude-haiku-4-20250514 https://cooking.example.com/soup

ENVIRONMENT VARIABLES:
  ANTHROPIC_API_KEY       Anthropic API key (required)
  NOTION_API_KEY          Notion integration token (required)
  NOTION_PARENT_PAGE_ID   Parent page for new recipe pages (required)
  RECIPE2NOTION_MODEL     Override the extraction model

SETUP:
  1. Create a Notion internal integration and copy its token.
  2. Share the destination parent page with the integration.
  3. export ANTHROPIC_API_KEY=... NOTION_API_KEY=... NOTION_PARENT_PAGE_ID=...
  4. recipe2notion <recipe url>
"#;

/// Import recipe webpages into Notion using an LLM extractor.
#[derive(Parser, Debug)]
#[command(
    name = "recipe2notion",
    version,
    about = "Import recipe webpages into Notion using an LLM extractor",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// HTTP/HTTPS URL of the recipe page.
    url: String,

    /// Anthropic model ID for extraction.
    #[arg(long, env = "RECIPE2NOTION_MODEL")]
    model: Option<String>,

    /// Max LLM output tokens for the recipe record.
    #[arg(long, env = "RECIPE2NOTION_MAX_TOKENS", default_value_t = 4096)]
    max_tokens: usize,

    /// Source page fetch timeout in seconds.
    #[arg(long, env = "RECIPE2NOTION_FETCH_TIMEOUT", default_value_t = 30)]
    fetch_timeout: u64,

    /// Per-API-call timeout (Anthropic, Notion) in seconds.
    #[arg(long, env = "RECIPE2NOTION_API_TIMEOUT", default_value_t = 120)]
    api_timeout: u64,

    /// Output structured JSON (ImportOutput) instead of a summary line.
    #[arg(long, env = "RECIPE2NOTION_JSON")]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "RECIPE2NOTION_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors and the page URL.
    #[arg(short, long, env = "RECIPE2NOTION_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || cli.json {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    // Credentials come from the environment; flags only override tunables.
    let base = ImportConfig::from_env().context("Configuration error")?;
    let mut builder = ImportConfig::builder()
        .anthropic_api_key(base.anthropic_api_key)
        .notion_api_key(base.notion_api_key)
        .notion_parent_page_id(base.notion_parent_page_id)
        .model(base.model)
        .max_tokens(cli.max_tokens)
        .fetch_timeout_secs(cli.fetch_timeout)
        .api_timeout_secs(cli.api_timeout);
    if let Some(model) = cli.model {
        builder = builder.model(model);
    }
    let config = builder.build().context("Configuration error")?;

    // ── Run import ───────────────────────────────────────────────────────
    let output = import_recipe(&cli.url, &config)
        .await
        .context("Import failed")?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("Failed to serialise output")?
        );
    } else if cli.quiet {
        println!("{}", output.page_url);
    } else {
        eprintln!(
            "{}  {}  {}  →  {}",
            green("✔"),
            bold(&output.recipe_name),
            dim(&format!("{} blocks, {}ms", output.block_count, output.stats.total_ms)),
            output.page_url,
        );
        eprintln!(
            "   {} tokens in  /  {} tokens out",
            dim(&output.stats.input_tokens.to_string()),
            dim(&output.stats.output_tokens.to_string()),
        );
        println!("{}", output.page_url);
    }

    Ok(())
}
