//! Splitting raw instruction text into ordered step strings.
//!
//! Boundaries are an ordered list of [`BoundaryRule`]s compiled into a single
//! leftmost-first alternation. When two rules match at the same offset, the
//! rule listed first wins. Adding a phrasing is a new rule, not a new
//! algorithm.

use std::sync::LazyLock;

use anyhow::{Context, Result, bail};
use regex::Regex;
use tracing::trace;

/// Built-in boundary markers, in order of recognition.
const DEFAULT_RULES: &[(&str, &str)] = &[
    ("line-break", r"\n"),
    ("enumerator", r"(?m:^\d+\.[ \t]+)"),
    ("hyphen-bullet", r"- "),
    ("asterisk-bullet", r"\* "),
    ("glyph-bullet", r"• "),
];

/// Sample text used to catch rules that can match without consuming input.
const ZERO_WIDTH_SAMPLE: &str = "1. Mix 2 cups, then bake at 180°C.\n- Serve; done • ok * x\r\n";

static DEFAULT_SEGMENTER: LazyLock<Segmenter> = LazyLock::new(|| {
    let rules = DEFAULT_RULES
        .iter()
        .map(|(name, pattern)| BoundaryRule::new(name, pattern))
        .collect::<Result<Vec<_>>>()
        .expect("built-in boundary rules should compile");
    Segmenter::new(rules).expect("built-in boundary rules should combine")
});

/// One named boundary marker.
#[derive(Debug, Clone)]
pub struct BoundaryRule {
    pub name: String,
    pub pattern: Regex,
}

impl BoundaryRule {
    /// Compile a boundary rule from a regex source string.
    ///
    /// Patterns that can produce a zero-width match are rejected: the empty
    /// string, or an assertion such as `\b` that matches between characters.
    pub fn new(name: &str, pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .with_context(|| format!("compile boundary rule '{name}' ({pattern})"))?;
        let zero_width = pattern.is_match("")
            || pattern
                .find_iter(ZERO_WIDTH_SAMPLE)
                .any(|found| found.is_empty());
        if zero_width {
            bail!("boundary rule '{name}' can match zero-width text");
        }
        Ok(Self {
            name: name.to_string(),
            pattern,
        })
    }
}

/// Ordered boundary rules plus the combined splitter built from them.
#[derive(Debug, Clone)]
pub struct Segmenter {
    rules: Vec<BoundaryRule>,
    splitter: Regex,
}

impl Segmenter {
    /// Build a segmenter from rules in priority order.
    pub fn new(rules: Vec<BoundaryRule>) -> Result<Self> {
        let splitter = combine(&rules)?;
        Ok(Self { rules, splitter })
    }

    /// Append a rule with the lowest priority.
    pub fn with_rule(mut self, rule: BoundaryRule) -> Result<Self> {
        self.rules.push(rule);
        self.splitter = combine(&self.rules)?;
        Ok(self)
    }

    pub fn rules(&self) -> &[BoundaryRule] {
        &self.rules
    }

    /// Split `text` into trimmed, non-empty segments in order of appearance.
    ///
    /// Segments are never re-split. An enumerator that was not at a
    /// recognized boundary stays in the segment text.
    pub fn segment(&self, text: &str) -> Vec<String> {
        if self.rules.is_empty() {
            let trimmed = text.trim();
            return if trimmed.is_empty() {
                Vec::new()
            } else {
                vec![trimmed.to_string()]
            };
        }

        let segments: Vec<String> = self
            .splitter
            .split(text)
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect();
        trace!(
            rules = self.rules.len(),
            segments = segments.len(),
            "segmented text"
        );
        segments
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        DEFAULT_SEGMENTER.clone()
    }
}

/// Split `text` with the built-in boundary rules.
pub fn segment(text: &str) -> Vec<String> {
    DEFAULT_SEGMENTER.segment(text)
}

fn combine(rules: &[BoundaryRule]) -> Result<Regex> {
    let alternation = rules
        .iter()
        .map(|rule| format!("(?:{})", rule.pattern.as_str()))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&alternation).context("combine boundary rules")
}
