//! Lexical trigger tables for dependency inference.
//!
//! A [`Lexicon`] is data: an ordered list of `{pattern: effect}` rules. New
//! phrasings or languages are added as rules without touching the inference
//! algorithm.

use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Name of the capture group holding the referenced step number.
pub const REFERENCE_GROUP: &str = "n";

/// What a matched trigger contributes to a step's dependency set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TriggerEffect {
    /// Every capture of group `n` names an earlier step.
    ExplicitReference,
    /// The step depends on the step immediately before it.
    PrecedingStep,
}

/// A compiled trigger pattern and its effect.
#[derive(Debug, Clone)]
pub struct TriggerRule {
    pub pattern: Regex,
    pub effect: TriggerEffect,
}

impl TriggerRule {
    /// Compile a rule. Explicit-reference patterns must define group `n`.
    pub fn new(pattern: &str, effect: TriggerEffect) -> Result<Self> {
        let compiled =
            Regex::new(pattern).with_context(|| format!("compile trigger pattern ({pattern})"))?;
        if effect == TriggerEffect::ExplicitReference
            && !compiled
                .capture_names()
                .any(|name| name == Some(REFERENCE_GROUP))
        {
            bail!("explicit-reference pattern ({pattern}) must define group (?P<{REFERENCE_GROUP}>...)");
        }
        Ok(Self {
            pattern: compiled,
            effect,
        })
    }
}

/// Built-in vocabularies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "de")]
    German,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::German => "de",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "de" | "german" | "deutsch" => Ok(Language::German),
            other => Err(format!("unknown language '{other}' (expected en or de)")),
        }
    }
}

impl Language {
    /// Trigger table as `(pattern, effect)` pairs.
    fn trigger_table(self) -> &'static [(&'static str, TriggerEffect)] {
        match self {
            Language::English => &[
                (r"(?i)\bstep\s*(?P<n>\d+)", TriggerEffect::ExplicitReference),
                (r"(?i)\bafter\b", TriggerEffect::PrecedingStep),
                (r"(?i)\bonly\s+once\b", TriggerEffect::PrecedingStep),
                (r"(?i)\bas\s+soon\s+as\b", TriggerEffect::PrecedingStep),
            ],
            Language::German => &[
                (r"(?i)schritt\s*(?P<n>\d+)", TriggerEffect::ExplicitReference),
                (r"(?i)\bnachdem\b", TriggerEffect::PrecedingStep),
                (r"(?i)\berst\s+wenn\b", TriggerEffect::PrecedingStep),
                (r"(?i)\bsobald\b", TriggerEffect::PrecedingStep),
            ],
        }
    }

    /// Word used in rendered step titles.
    pub fn step_keyword(self) -> &'static str {
        match self {
            Language::English => "Step",
            Language::German => "Schritt",
        }
    }

    /// Default document title.
    pub fn default_title(self) -> &'static str {
        match self {
            Language::English => "Instructions",
            Language::German => "Anleitung",
        }
    }
}

/// Ordered trigger rules used by the dependency inferrer.
#[derive(Debug, Clone)]
pub struct Lexicon {
    rules: Vec<TriggerRule>,
}

impl Lexicon {
    pub fn new(rules: Vec<TriggerRule>) -> Self {
        Self { rules }
    }

    /// Built-in rules for `language`.
    pub fn for_language(language: Language) -> Self {
        let rules = language
            .trigger_table()
            .iter()
            .map(|(pattern, effect)| {
                TriggerRule::new(pattern, *effect).expect("built-in trigger pattern should compile")
            })
            .collect();
        Self { rules }
    }

    pub fn with_rule(mut self, rule: TriggerRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[TriggerRule] {
        &self.rules
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::for_language(Language::default())
    }
}
