//! Page publication: create the Notion page from converted blocks.
//!
//! One `POST /v1/pages` call creates the page with its full block children in
//! a single request, so a failed publish leaves nothing behind — there is no
//! partially written page to clean up. Publication only happens after
//! extraction and conversion have fully succeeded.

use crate::config::{ImportConfig, NOTION_VERSION};
use crate::error::RecipeImportError;
use crate::pipeline::blocks::Block;
use serde_json::{json, Value};
use tracing::{debug, info};

const NOTION_PAGES_URL: &str = "https://api.notion.com/v1/pages";

/// Notion rejects rich-text elements longer than 2000 characters.
const MAX_RICH_TEXT_CHARS: usize = 2000;

/// Create a Notion page titled `name` with the given block children.
///
/// Returns the URL of the created page.
pub async fn publish_recipe(
    name: &str,
    blocks: &[Block],
    config: &ImportConfig,
) -> Result<String, RecipeImportError> {
    info!("Creating Notion page '{}' ({} blocks)", name, blocks.len());

    let payload = page_payload(name, blocks, &config.notion_parent_page_id);

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.api_timeout_secs))
        .build()
        .map_err(|e| RecipeImportError::PublishFailed {
            reason: e.to_string(),
        })?;

    let response = client
        .post(NOTION_PAGES_URL)
        .bearer_auth(&config.notion_api_key)
        .header("Notion-Version", NOTION_VERSION)
        .json(&payload)
        .send()
        .await
        .map_err(|e| RecipeImportError::PublishFailed {
            reason: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        let detail = response.text().await.unwrap_or_default();
        return Err(match status.as_u16() {
            401 | 403 => RecipeImportError::PublishAuth { detail },
            404 => RecipeImportError::InvalidParent {
                parent_id: config.notion_parent_page_id.clone(),
            },
            code => RecipeImportError::PublishRejected {
                status: code,
                detail,
            },
        });
    }

    let page: Value = response
        .json()
        .await
        .map_err(|e| RecipeImportError::PublishFailed {
            reason: format!("unreadable API response: {e}"),
        })?;

    let url = page
        .get("url")
        .and_then(Value::as_str)
        .ok_or_else(|| RecipeImportError::PublishFailed {
            reason: "page created but response carried no URL".into(),
        })?
        .to_string();

    debug!("Created page: {}", url);
    Ok(url)
}

/// Build the full `POST /v1/pages` payload.
pub fn page_payload(name: &str, blocks: &[Block], parent_id: &str) -> Value {
    json!({
        "parent": { "page_id": parent_id },
        "properties": {
            "title": { "title": [rich_text(name)] },
        },
        "children": blocks.iter().map(block_to_notion).collect::<Vec<_>>(),
    })
}

/// Map one [`Block`] onto its Notion block object.
pub fn block_to_notion(block: &Block) -> Value {
    let (kind, text) = match block {
        Block::Heading { text } => ("heading_1", text),
        Block::Paragraph { text } => ("paragraph", text),
        Block::BulletedListItem { text } => ("bulleted_list_item", text),
        Block::NumberedListItem { text } => ("numbered_list_item", text),
    };
    json!({
        "object": "block",
        "type": kind,
        kind: { "rich_text": [rich_text(text)] },
    })
}

/// Build a single plain rich-text element, clamped to Notion's length limit.
fn rich_text(content: &str) -> Value {
    let clamped: String = content.chars().take(MAX_RICH_TEXT_CHARS).collect();
    json!({ "type": "text", "text": { "content": clamped } })
}
