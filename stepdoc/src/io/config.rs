//! Generator configuration stored in `stepdoc.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::lexicon::{Language, Lexicon, TriggerEffect, TriggerRule};
use crate::core::segmenter::{BoundaryRule, Segmenter};
use crate::render::OutputFormat;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "stepdoc.toml";

/// Generator configuration (TOML).
///
/// Every field is optional. Extra boundary and trigger rules are appended
/// after the built-in ones for the selected language.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StepdocConfig {
    pub language: Language,

    /// Document title; the language default when unset.
    pub title: Option<String>,

    /// Word used in step titles; the language default when unset.
    pub step_keyword: Option<String>,

    pub format: OutputFormat,

    pub boundaries: Vec<BoundaryConfig>,

    pub triggers: Vec<TriggerConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoundaryConfig {
    pub name: String,
    pub pattern: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TriggerConfig {
    pub pattern: String,
    pub effect: TriggerEffect,
}

impl StepdocConfig {
    pub fn validate(&self) -> Result<()> {
        if self.title.as_deref().is_some_and(|title| title.trim().is_empty()) {
            return Err(anyhow!("title must not be blank"));
        }
        if self
            .step_keyword
            .as_deref()
            .is_some_and(|keyword| keyword.trim().is_empty())
        {
            return Err(anyhow!("step_keyword must not be blank"));
        }
        self.segmenter()?;
        self.lexicon()?;
        Ok(())
    }

    /// Built-in boundary rules followed by the configured ones.
    pub fn segmenter(&self) -> Result<Segmenter> {
        self.boundaries
            .iter()
            .try_fold(Segmenter::default(), |segmenter, boundary| {
                segmenter.with_rule(BoundaryRule::new(&boundary.name, &boundary.pattern)?)
            })
    }

    /// Built-in trigger table for `language` followed by the configured rules.
    pub fn lexicon(&self) -> Result<Lexicon> {
        self.triggers
            .iter()
            .try_fold(Lexicon::for_language(self.language), |lexicon, trigger| {
                let rule = TriggerRule::new(&trigger.pattern, trigger.effect)?;
                Ok(lexicon.with_rule(rule))
            })
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `StepdocConfig::default()`.
pub fn load_config(path: &Path) -> Result<StepdocConfig> {
    if !path.exists() {
        return Ok(StepdocConfig::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: StepdocConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}
