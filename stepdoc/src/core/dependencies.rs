//! Lexical inference of backward dependencies between steps.
//!
//! Each step is inspected independently: its dependency set is a pure function
//! of its own text and its 1-based position. Edges only ever point to earlier
//! steps, so the result is acyclic by construction.

use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::core::lexicon::{Lexicon, REFERENCE_GROUP, TriggerEffect};
use crate::core::types::DependencyMap;

/// Infer dependencies with the default (English) lexicon.
pub fn infer_dependencies<S: AsRef<str>>(steps: &[S]) -> DependencyMap {
    infer_dependencies_with(&Lexicon::default(), steps)
}

/// Infer dependencies for every step using `lexicon`.
///
/// Steps without any signal get no entry.
pub fn infer_dependencies_with<S: AsRef<str>>(lexicon: &Lexicon, steps: &[S]) -> DependencyMap {
    let map: DependencyMap = steps
        .iter()
        .enumerate()
        .map(|(offset, text)| {
            let index = offset + 1;
            (index, infer_step(lexicon, index, text.as_ref()))
        })
        .collect();
    debug!(
        steps = steps.len(),
        dependent_steps = map.len(),
        "inferred dependencies"
    );
    map
}

/// Dependency set of the step at `index` (1-based) with the given text.
pub fn infer_step(lexicon: &Lexicon, index: usize, text: &str) -> BTreeSet<usize> {
    let mut deps = BTreeSet::new();
    for rule in lexicon.rules() {
        match rule.effect {
            TriggerEffect::ExplicitReference => {
                for caps in rule.pattern.captures_iter(text) {
                    let Some(raw) = caps.name(REFERENCE_GROUP) else {
                        continue;
                    };
                    let Ok(referenced) = raw.as_str().parse::<usize>() else {
                        trace!(index, raw = raw.as_str(), "skipped unparseable reference");
                        continue;
                    };
                    if (1..index).contains(&referenced) {
                        deps.insert(referenced);
                    } else {
                        trace!(index, referenced, "dropped non-backward reference");
                    }
                }
            }
            TriggerEffect::PrecedingStep => {
                if index > 1 && rule.pattern.is_match(text) {
                    deps.insert(index - 1);
                }
            }
        }
    }
    deps
}
