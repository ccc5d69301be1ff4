//! Serializers for [`Document`](crate::document::Document).
//!
//! Renderers are pure: the same document and labels always produce the same
//! bytes.

pub mod json;
pub mod markdown;
pub mod xml;

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::document::{Document, Labels};

/// Supported output encodings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Xml,
    Json,
    Markdown,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Xml => "xml",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "markdown",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "xml" => Ok(OutputFormat::Xml),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            other => Err(format!(
                "unknown format '{other}' (expected xml, json or markdown)"
            )),
        }
    }
}

/// Render `doc` in `format`. Output always ends with a newline.
pub fn render(doc: &Document, labels: &Labels, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Xml => xml::render_xml(doc, labels),
        OutputFormat::Json => json::render_json(doc),
        OutputFormat::Markdown => markdown::render_markdown(doc, labels),
    }
}
