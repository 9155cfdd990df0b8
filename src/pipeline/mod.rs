//! Pipeline stages for recipe import.
//!
//! Each submodule implements exactly one transformation step. Keeping stages
//! separate makes each independently testable and lets us swap
//! implementations (e.g. a different extraction model) without touching
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! fetch ──▶ extract ──▶ blocks ──▶ publish
//! (page)    (LLM JSON)  (convert)  (Notion)
//! ```
//!
//! 1. [`fetch`]   — download the recipe webpage body
//! 2. [`extract`] — one Anthropic call turning the page into a
//!    `{name, content}` markdown record
//! 3. [`blocks`]  — pure markdown-to-block conversion; the only stage with
//!    non-trivial internal state (a list-run accumulator)
//! 4. [`publish`] — create the Notion page from the block sequence
//!
//! Stages run strictly in sequence, one attempt each, fail-fast. The fetch,
//! extract, and publish stages are the only suspension points; [`blocks`]
//! is synchronous and side-effect free.

pub mod blocks;
pub mod extract;
pub mod fetch;
pub mod publish;
