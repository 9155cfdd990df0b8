//! The request/response operation for HTTP front ends.
//!
//! This crate does not ship a web server — routing is the host application's
//! business. What it ships is the one operation such a host needs: a typed
//! request in, a typed response out, both serde-serialisable, with every
//! pipeline failure already folded into a `{error, details}` body carrying a
//! machine-readable category. Mounting this on axum, a lambda, or anything
//! else is a five-line exercise.

use crate::config::ImportConfig;
use crate::error::RecipeImportError;
use crate::import::{import_recipe, ImportOutput};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// An import request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportRequest {
    /// HTTP/HTTPS URL of the recipe page to import.
    pub url: String,
}

/// The response to an import request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImportResponse {
    Success {
        success: bool,
        #[serde(rename = "publishedUrl")]
        published_url: String,
        #[serde(rename = "recipeName")]
        recipe_name: String,
    },
    Failure {
        /// Machine-readable category (`invalid_request`, `network_error`,
        /// `extraction_error`, `publish_error`).
        error: String,
        /// Human-readable detail message.
        details: String,
    },
}

impl ImportResponse {
    fn success(output: ImportOutput) -> Self {
        ImportResponse::Success {
            success: true,
            published_url: output.page_url,
            recipe_name: output.recipe_name,
        }
    }

    fn failure(err: &RecipeImportError) -> Self {
        ImportResponse::Failure {
            error: err.category().as_str().to_string(),
            details: err.to_string(),
        }
    }

    /// Whether this response reports a successful import.
    pub fn is_success(&self) -> bool {
        matches!(self, ImportResponse::Success { .. })
    }
}

/// Handle one import request.
///
/// Only `POST` is accepted; any other method is rejected immediately,
/// without invoking the pipeline. Every pipeline error is caught here and
/// reported as a failure response — this function never returns `Err`.
pub async fn handle(method: &str, request: &ImportRequest, config: &ImportConfig) -> ImportResponse {
    if !method.eq_ignore_ascii_case("POST") {
        return ImportResponse::failure(&RecipeImportError::MethodNotAllowed {
            method: method.to_string(),
        });
    }

    match import_recipe(&request.url, config).await {
        Ok(output) => ImportResponse::success(output),
        Err(err) => {
            warn!("Import failed ({}): {}", err.category().as_str(), err);
            ImportResponse::failure(&err)
        }
    }
}
