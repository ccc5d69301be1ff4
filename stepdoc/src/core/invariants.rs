//! Structural invariants of dependency maps.

use crate::core::types::DependencyMap;

/// Check a dependency map against a sequence of `step_count` steps:
/// - Keys name existing steps (`1..=step_count`)
/// - Every dependency `d` of step `i` satisfies `1 <= d < i`
/// - No stored entry is empty
pub fn validate_dependency_map(map: &DependencyMap, step_count: usize) -> Vec<String> {
    let mut errors = Vec::new();
    for (step, deps) in map.iter() {
        if step == 0 || step > step_count {
            errors.push(format!(
                "step {step}: no such step (sequence has {step_count})"
            ));
        }
        if deps.is_empty() {
            errors.push(format!("step {step}: empty dependency set must be omitted"));
        }
        for dep in deps {
            if *dep == 0 || *dep >= step {
                errors.push(format!(
                    "step {step}: dependency {dep} must point to an earlier step"
                ));
            }
        }
    }
    errors
}

/// Check that step ids run `1..=N` in order without gaps.
pub fn validate_dense_ids<I: IntoIterator<Item = usize>>(ids: I) -> Vec<String> {
    ids.into_iter()
        .enumerate()
        .filter_map(|(offset, id)| {
            let expected = offset + 1;
            (id != expected).then(|| format!("step at position {expected} has id {id}"))
        })
        .collect()
}
