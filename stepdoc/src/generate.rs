//! Orchestration: raw text → steps → dependencies → document.

use std::collections::{BTreeMap, BTreeSet};

use anyhow::{Context, Result, anyhow, bail};
use tracing::{debug, info};

use crate::core::dependencies::infer_dependencies_with;
use crate::core::invariants::validate_dependency_map;
use crate::core::lexicon::Lexicon;
use crate::core::segmenter::Segmenter;
use crate::core::types::{DependencyMap, StepSequence};
use crate::document::{Document, DocumentOptions};

/// How the dependency map for a document is obtained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DependencySource {
    /// Lexical inference from step text.
    #[default]
    Inferred,
    /// Flat list, no dependencies at all.
    Disabled,
    /// Caller-supplied map, checked against the step sequence.
    Manual(DependencyMap),
}

/// Everything needed to turn text into a document.
#[derive(Debug, Clone)]
pub struct Generator {
    pub segmenter: Segmenter,
    pub lexicon: Lexicon,
    pub dependencies: DependencySource,
}

impl Default for Generator {
    fn default() -> Self {
        Self {
            segmenter: Segmenter::default(),
            lexicon: Lexicon::default(),
            dependencies: DependencySource::Inferred,
        }
    }
}

/// Steps and their dependencies before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub steps: StepSequence,
    pub dependencies: DependencyMap,
}

impl Generator {
    /// Segment and resolve dependencies.
    ///
    /// Only a manual dependency map can fail, when it breaks the backward
    /// edge invariant for the segmented steps.
    pub fn analyze(&self, text: &str) -> Result<Analysis> {
        let steps = StepSequence::from_segments(self.segmenter.segment(text));
        debug!(steps = steps.len(), "segmented input");

        let dependencies = match &self.dependencies {
            DependencySource::Inferred => infer_dependencies_with(&self.lexicon, &steps.texts()),
            DependencySource::Disabled => DependencyMap::new(),
            DependencySource::Manual(map) => {
                let errors = validate_dependency_map(map, steps.len());
                if !errors.is_empty() {
                    bail!("invalid dependencies:\n- {}", errors.join("\n- "));
                }
                map.clone()
            }
        };
        Ok(Analysis {
            steps,
            dependencies,
        })
    }

    /// Build the document for `text`.
    pub fn generate(&self, text: &str, options: &DocumentOptions) -> Result<Document> {
        let analysis = self.analyze(text)?;
        let doc = Document::build(&analysis.steps, &analysis.dependencies, options);
        info!(
            steps = doc.steps.len(),
            dependent_steps = analysis.dependencies.len(),
            "generated document"
        );
        Ok(doc)
    }
}

/// Parse manual dependency entries of the form `STEP=DEP[,DEP...]`.
///
/// Repeated entries for the same step are merged.
pub fn parse_manual_dependencies<S: AsRef<str>>(entries: &[S]) -> Result<DependencyMap> {
    let mut merged: BTreeMap<usize, BTreeSet<usize>> = BTreeMap::new();
    for entry in entries {
        let entry = entry.as_ref();
        let (step, deps) = entry
            .split_once('=')
            .ok_or_else(|| anyhow!("dependency '{entry}' must look like STEP=DEP[,DEP]"))?;
        let step: usize = step
            .trim()
            .parse()
            .with_context(|| format!("step number in '{entry}'"))?;
        let deps = deps
            .split(',')
            .map(str::trim)
            .filter(|dep| !dep.is_empty())
            .map(|dep| {
                dep.parse::<usize>()
                    .with_context(|| format!("dependency '{dep}' in '{entry}'"))
            })
            .collect::<Result<BTreeSet<_>>>()?;
        merged.entry(step).or_default().extend(deps);
    }
    Ok(merged.into_iter().collect())
}
