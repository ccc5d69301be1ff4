//! Turn loosely structured instructions into an ordered step document.
//!
//! Raw text (numbered lists, bullets, free-form lines) is split into steps,
//! backward dependencies between steps are inferred from lexical triggers,
//! and the result is rendered as XML, JSON or Markdown.
//!
//! - **[`core`]**: Pure, deterministic logic (segmentation, trigger tables,
//!   dependency inference, invariants). No I/O.
//! - **[`io`]**: Side-effecting operations (config, input, output).
//!
//! [`generate`] wires core logic into a [`document::Document`]; [`render`]
//! serializes it; [`validate`] checks rendered JSON documents.

pub mod core;
pub mod document;
pub mod exit_codes;
pub mod generate;
pub mod io;
pub mod logging;
pub mod render;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod validate;
