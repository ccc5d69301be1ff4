//! Reading raw instruction text.

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

/// Where raw text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource<'a> {
    Stdin,
    File(&'a Path),
}

impl<'a> InputSource<'a> {
    /// `None` or `-` selects stdin.
    pub fn from_arg(path: Option<&'a Path>) -> Self {
        match path {
            Some(path) if path.as_os_str() != "-" => InputSource::File(path),
            _ => InputSource::Stdin,
        }
    }
}

/// Read the whole input as UTF-8 text.
pub fn read_input(source: &InputSource<'_>) -> Result<String> {
    let text = match source {
        InputSource::File(path) => {
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?
        }
        InputSource::Stdin => read_from(std::io::stdin().lock()).context("read stdin")?,
    };
    debug!(source = ?source, bytes = text.len(), "read input");
    Ok(text)
}

fn read_from<R: Read>(mut reader: R) -> Result<String> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf)?;
    Ok(buf)
}
