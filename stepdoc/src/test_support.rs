//! Test-only helpers for building steps, dependency maps and timestamps.

use std::collections::BTreeSet;

use chrono::{DateTime, FixedOffset};

use crate::core::types::DependencyMap;

/// Recipe from the demo driver, in English.
pub const RECIPE: &str = "1. Preheat oven\n- Mix flour and sugar\n• Add eggs after flour and sugar were mixed";

/// Deterministic creation timestamp used across tests.
pub fn fixed_timestamp() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2024-05-01T12:30:00+02:00").expect("valid timestamp")
}

/// Build a dependency map from `(step, deps)` pairs.
pub fn map_of(entries: &[(usize, &[usize])]) -> DependencyMap {
    entries
        .iter()
        .map(|(step, deps)| (*step, deps.iter().copied().collect::<BTreeSet<_>>()))
        .collect()
}
