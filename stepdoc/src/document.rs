//! Instruction document tree built from steps and their dependencies.

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::lexicon::Language;
use crate::core::types::{DependencyMap, StepSequence};

static ENUMERATOR_REMNANT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.(?:\s+|$)").expect("enumerator pattern should compile"));

/// Rendered instruction document.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub created_at: DateTime<FixedOffset>,
    pub description: String,
    pub steps: Vec<StepNode>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StepNode {
    pub id: usize,
    pub title: String,
    pub details: String,
    pub dependencies: Vec<usize>,
}

/// Element and attribute names used by markup renderers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Labels {
    pub root: &'static str,
    pub title_attr: &'static str,
    pub created_attr: &'static str,
    pub description: &'static str,
    pub steps: &'static str,
    pub step: &'static str,
    pub id_attr: &'static str,
    pub step_title: &'static str,
    pub details: &'static str,
    pub dependencies: &'static str,
    pub step_ref: &'static str,
    pub created_caption: &'static str,
    pub depends_caption: &'static str,
}

impl Labels {
    pub fn for_language(language: Language) -> Self {
        match language {
            Language::English => Self {
                root: "Instructions",
                title_attr: "Title",
                created_attr: "CreatedAt",
                description: "Description",
                steps: "Steps",
                step: "Step",
                id_attr: "ID",
                step_title: "Title",
                details: "Details",
                dependencies: "Dependencies",
                step_ref: "StepRef",
                created_caption: "Created",
                depends_caption: "depends on",
            },
            Language::German => Self {
                root: "Anleitung",
                title_attr: "Titel",
                created_attr: "ErstelltAm",
                description: "Beschreibung",
                steps: "Schritte",
                step: "Schritt",
                id_attr: "ID",
                step_title: "Titel",
                details: "Details",
                dependencies: "Abhaengigkeiten",
                step_ref: "SchrittRef",
                created_caption: "Erstellt am",
                depends_caption: "hängt ab von",
            },
        }
    }
}

/// Inputs the document builder needs beyond the steps themselves.
#[derive(Clone, Debug)]
pub struct DocumentOptions {
    pub title: String,
    pub step_keyword: String,
    pub language: Language,
    pub created_at: DateTime<FixedOffset>,
}

impl DocumentOptions {
    /// Language defaults for title and keyword.
    pub fn new(language: Language, created_at: DateTime<FixedOffset>) -> Self {
        Self {
            title: language.default_title().to_string(),
            step_keyword: language.step_keyword().to_string(),
            language,
            created_at,
        }
    }
}

impl Document {
    /// Assemble the document tree from already computed steps and
    /// dependencies. Pure: the timestamp comes from `options`.
    pub fn build(steps: &StepSequence, deps: &DependencyMap, options: &DocumentOptions) -> Self {
        let steps = steps
            .iter()
            .map(|step| StepNode {
                id: step.index,
                title: format!("{} {}", options.step_keyword, step.index),
                details: strip_enumerator(&step.text),
                dependencies: deps.get(step.index).collect(),
            })
            .collect::<Vec<_>>();
        Self {
            title: options.title.clone(),
            created_at: options.created_at,
            description: describe(options.language, steps.len()),
            steps,
        }
    }

    /// Dependency map carried by the document's step nodes.
    pub fn dependency_map(&self) -> DependencyMap {
        self.steps
            .iter()
            .map(|step| (step.id, step.dependencies.iter().copied().collect()))
            .collect()
    }
}

/// Remove a leading `<digits>.` enumerator left over from segmentation.
pub fn strip_enumerator(text: &str) -> String {
    ENUMERATOR_REMNANT.replace(text, "").into_owned()
}

fn describe(language: Language, count: usize) -> String {
    match language {
        Language::English => {
            format!("Generated automatically from unstructured text. {count} steps detected.")
        }
        Language::German => {
            format!("Automatisch generiert aus unstrukturiertem Text. {count} Schritte erkannt.")
        }
    }
}
