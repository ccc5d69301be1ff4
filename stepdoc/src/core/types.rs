//! Shared deterministic types for step extraction.
//!
//! These types define the contract between the segmenter, the dependency
//! inferrer, and the document renderer. They carry no I/O and are immutable
//! once built.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// One instruction unit with its dense 1-based position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub index: usize,
    pub text: String,
}

/// Ordered steps with indices `1..=N` and no gaps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepSequence {
    steps: Vec<Step>,
}

impl StepSequence {
    /// Assign indices to segments. Blank segments are skipped so indices
    /// stay dense.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let steps = segments
            .into_iter()
            .filter_map(|segment| {
                let text = segment.as_ref().trim();
                (!text.is_empty()).then(|| text.to_string())
            })
            .enumerate()
            .map(|(offset, text)| Step {
                index: offset + 1,
                text,
            })
            .collect();
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    /// Step texts in order.
    pub fn texts(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.text.as_str()).collect()
    }

    /// Look up a step by its 1-based index.
    pub fn get(&self, index: usize) -> Option<&Step> {
        index.checked_sub(1).and_then(|offset| self.steps.get(offset))
    }
}

impl<'a> IntoIterator for &'a StepSequence {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Backward dependencies keyed by step index.
///
/// A missing key means "no known dependency". Empty sets are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyMap {
    entries: BTreeMap<usize, BTreeSet<usize>>,
}

impl DependencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `deps` for `step`, replacing any previous entry. Empty sets
    /// remove the entry instead.
    pub fn insert(&mut self, step: usize, deps: BTreeSet<usize>) {
        if deps.is_empty() {
            self.entries.remove(&step);
        } else {
            self.entries.insert(step, deps);
        }
    }

    /// Dependencies of `step` in ascending order; empty when absent.
    pub fn get(&self, step: usize) -> impl Iterator<Item = usize> + '_ {
        self.entries.get(&step).into_iter().flatten().copied()
    }

    pub fn contains_key(&self, step: usize) -> bool {
        self.entries.contains_key(&step)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending step order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &BTreeSet<usize>)> {
        self.entries.iter().map(|(step, deps)| (*step, deps))
    }
}

impl FromIterator<(usize, BTreeSet<usize>)> for DependencyMap {
    fn from_iter<T: IntoIterator<Item = (usize, BTreeSet<usize>)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (step, deps) in iter {
            map.insert(step, deps);
        }
        map
    }
}
