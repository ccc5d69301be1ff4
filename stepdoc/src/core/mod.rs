//! Deterministic, pure logic for step extraction.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! text and return deterministic outputs suitable for tests.

pub mod dependencies;
pub mod invariants;
pub mod lexicon;
pub mod segmenter;
pub mod types;
