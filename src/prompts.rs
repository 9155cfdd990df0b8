//! The extraction prompt for recipe webpages.
//!
//! Centralising the prompt here keeps the markdown convention in one place:
//! the block converter's input-format assumptions (headings, `- ` bullets,
//! `1. ` numbered steps) are exactly what this prompt mandates, so changing
//! one without the other breaks the pipeline. Unit tests can inspect the
//! prompt directly without a live model.

/// Build the extraction instruction for a fetched recipe page.
///
/// The model must answer with strict JSON (`{"name", "content"}`) where
/// `content` is markdown following the fixed section convention below.
/// Fenced code blocks around the JSON are tolerated by the reply parser,
/// but the prompt asks the model not to emit them.
pub fn extraction_prompt(page_text: &str, source_url: &str) -> String {
    format!(
        r##"Extract the recipe information from this webpage and format it according to these exact rules:

RULES:
1. "Inspo:" should be followed by the source URL: {source_url}
2. "Time:" should indicate prep time, cook time, and total time in this format:
   - Prep: X min | Cook: Y min | Total: Z min
   (omit any component the page does not state; never guess)
3. Use these markdown sections, in this order, each introduced by a "# " heading:
   # Overview
   # Notes
   # Ingredients
   # Supplies
   # Instructions
4. "# Overview" contains the Inspo and Time lines plus a one-or-two sentence
   description, each as its own plain-text line.
5. "# Notes" lists tips, substitutions, and storage advice as "- " bullets.
   Omit the section body if the page has none.
6. "# Ingredients" lists every ingredient as a "- " bullet with the quantity
   inline, e.g. "- 2 cups all-purpose flour".
7. "# Supplies" lists required equipment as "- " bullets.
8. "# Instructions" lists the steps as a numbered list: "1. ", "2. ", and so on.
9. Do not use any other markdown: no bold, italics, links, tables, nesting,
   or code blocks.

OUTPUT FORMAT:
Respond with ONLY a JSON object of this exact shape, and nothing else:
{{"name": "<recipe name>", "content": "<markdown following the rules above>"}}
- Escape newlines inside "content" as \n so the JSON stays valid.
- Do NOT wrap the JSON in ``` fences.
- Do NOT add commentary before or after the JSON.

WEBPAGE CONTENT:
{page_text}"##
    )
}
