//! JSON rendering of instruction documents.

use anyhow::{Context, Result};

use crate::document::Document;

/// Pretty-printed JSON with trailing newline.
pub fn render_json(doc: &Document) -> Result<String> {
    let mut payload = serde_json::to_string_pretty(doc).context("serialize document json")?;
    payload.push('\n');
    Ok(payload)
}

/// Parse a document previously produced by [`render_json`].
pub fn parse_json(raw: &str) -> Result<Document> {
    serde_json::from_str(raw).context("parse document json")
}
