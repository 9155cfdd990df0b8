//! Configuration for a recipe import.
//!
//! All behaviour is controlled through one [`ImportConfig`], built via its
//! [`ImportConfigBuilder`] or loaded from the environment with
//! [`ImportConfig::from_env`]. Keeping every knob in one struct makes it
//! trivial to share a config across requests and to diff two runs.
//!
//! Credentials are validated when the config is constructed — before the
//! first network call — so a misconfigured deployment fails immediately
//! rather than mid-pipeline.

use crate::error::RecipeImportError;
use std::fmt;

/// Default Anthropic model used for recipe extraction.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Notion API version header value this crate is written against.
pub const NOTION_VERSION: &str = "2022-06-28";

/// Configuration for a recipe import.
///
/// Built via [`ImportConfig::builder()`] or [`ImportConfig::from_env()`].
///
/// # Example
/// ```rust
/// use recipe2notion::ImportConfig;
///
/// let config = ImportConfig::builder()
///     .anthropic_api_key("sk-ant-...")
///     .notion_api_key("ntn_...")
///     .notion_parent_page_id("a1b2c3d4e5f6")
///     .model("claude-sonnet-4-20250514")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ImportConfig {
    /// Anthropic API key used for the extraction call.
    pub anthropic_api_key: String,

    /// Notion integration token used for page creation.
    pub notion_api_key: String,

    /// Notion page ID under which new recipe pages are created.
    ///
    /// The integration must be shared with this page or every publish call
    /// fails with an invalid-parent error.
    pub notion_parent_page_id: String,

    /// Anthropic model identifier. Default: [`DEFAULT_MODEL`].
    pub model: String,

    /// Maximum tokens the model may generate for the recipe record. Default: 4096.
    ///
    /// A full recipe (overview, ingredients, supplies, instructions) rarely
    /// exceeds 1 500 output tokens; 4 096 leaves headroom for long recipes
    /// without letting a runaway reply cost much.
    pub max_tokens: usize,

    /// Maximum bytes of page text sent to the model. Default: 200 000.
    ///
    /// Recipe pages are notoriously bloated (ads, scripts, comment threads).
    /// The recipe content itself almost always appears early in the document,
    /// so truncating the tail keeps the request under the model's context
    /// window without losing the parts that matter.
    pub max_page_bytes: usize,

    /// Source page fetch timeout in seconds. Default: 30.
    pub fetch_timeout_secs: u64,

    /// Per-API-call timeout (Anthropic and Notion) in seconds. Default: 120.
    pub api_timeout_secs: u64,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            anthropic_api_key: String::new(),
            notion_api_key: String::new(),
            notion_parent_page_id: String::new(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 4096,
            max_page_bytes: 200_000,
            fetch_timeout_secs: 30,
            api_timeout_secs: 120,
        }
    }
}

impl fmt::Debug for ImportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Credentials are redacted; everything else prints normally.
        f.debug_struct("ImportConfig")
            .field("anthropic_api_key", &"<redacted>")
            .field("notion_api_key", &"<redacted>")
            .field("notion_parent_page_id", &self.notion_parent_page_id)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("max_page_bytes", &self.max_page_bytes)
            .field("fetch_timeout_secs", &self.fetch_timeout_secs)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .finish()
    }
}

impl ImportConfig {
    /// Create a new builder for `ImportConfig`.
    pub fn builder() -> ImportConfigBuilder {
        ImportConfigBuilder {
            config: Self::default(),
        }
    }

    /// Load configuration from the environment.
    ///
    /// Required: `ANTHROPIC_API_KEY`, `NOTION_API_KEY`, `NOTION_PARENT_PAGE_ID`.
    /// Optional: `RECIPE2NOTION_MODEL` overrides the default model.
    pub fn from_env() -> Result<Self, RecipeImportError> {
        let mut builder = Self::builder()
            .anthropic_api_key(require_env("ANTHROPIC_API_KEY")?)
            .notion_api_key(require_env("NOTION_API_KEY")?)
            .notion_parent_page_id(require_env("NOTION_PARENT_PAGE_ID")?);

        if let Ok(model) = std::env::var("RECIPE2NOTION_MODEL") {
            if !model.is_empty() {
                builder = builder.model(model);
            }
        }

        builder.build()
    }
}

fn require_env(var: &'static str) -> Result<String, RecipeImportError> {
    match std::env::var(var) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(RecipeImportError::MissingCredential { var }),
    }
}

/// Builder for [`ImportConfig`].
#[derive(Debug)]
pub struct ImportConfigBuilder {
    config: ImportConfig,
}

impl ImportConfigBuilder {
    pub fn anthropic_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.anthropic_api_key = key.into();
        self
    }

    pub fn notion_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.notion_api_key = key.into();
        self
    }

    pub fn notion_parent_page_id(mut self, id: impl Into<String>) -> Self {
        self.config.notion_parent_page_id = id.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn max_tokens(mut self, n: usize) -> Self {
        self.config.max_tokens = n;
        self
    }

    pub fn max_page_bytes(mut self, n: usize) -> Self {
        self.config.max_page_bytes = n.max(1024);
        self
    }

    pub fn fetch_timeout_secs(mut self, secs: u64) -> Self {
        self.config.fetch_timeout_secs = secs.max(1);
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = secs.max(1);
        self
    }

    /// Build the configuration, validating that every credential is present.
    pub fn build(self) -> Result<ImportConfig, RecipeImportError> {
        let c = &self.config;
        if c.anthropic_api_key.trim().is_empty() {
            return Err(RecipeImportError::MissingCredential {
                var: "ANTHROPIC_API_KEY",
            });
        }
        if c.notion_api_key.trim().is_empty() {
            return Err(RecipeImportError::MissingCredential {
                var: "NOTION_API_KEY",
            });
        }
        if c.notion_parent_page_id.trim().is_empty() {
            return Err(RecipeImportError::MissingCredential {
                var: "NOTION_PARENT_PAGE_ID",
            });
        }
        if c.model.trim().is_empty() {
            return Err(RecipeImportError::InvalidConfig(
                "Model identifier must not be empty".into(),
            ));
        }
        if c.max_tokens == 0 {
            return Err(RecipeImportError::InvalidConfig(
                "max_tokens must be ≥ 1".into(),
            ));
        }
        Ok(self.config)
    }
}
