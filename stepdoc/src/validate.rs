//! Validation of rendered JSON documents: schema conformance plus the
//! step invariants JSON Schema cannot express.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::validator_for;
use serde_json::Value;

use crate::core::invariants::{validate_dense_ids, validate_dependency_map};
use crate::document::Document;

/// Embedded v1 schema for instruction documents.
pub const DOCUMENT_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../schemas/instructions/v1.schema.json"
));

/// Parse and validate a document (schema + invariants).
pub fn validate_document_str(raw: &str) -> Result<Document> {
    let value: Value = serde_json::from_str(raw).context("parse document json")?;
    validate_schema(&value)?;
    let doc: Document = serde_json::from_value(value).context("deserialize document")?;
    let errors = document_invariants(&doc);
    if !errors.is_empty() {
        bail!("invariant violations:\n- {}", errors.join("\n- "));
    }
    Ok(doc)
}

/// Load a document from disk and validate it.
pub fn validate_document_file(path: &Path) -> Result<Document> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    validate_document_str(&raw).with_context(|| format!("validate {}", path.display()))
}

/// Dense 1-based ids and backward-only dependencies.
pub fn document_invariants(doc: &Document) -> Vec<String> {
    let mut errors = validate_dense_ids(doc.steps.iter().map(|step| step.id));
    errors.extend(validate_dependency_map(
        &doc.dependency_map(),
        doc.steps.len(),
    ));
    errors
}

fn validate_schema(instance: &Value) -> Result<()> {
    let schema: Value = serde_json::from_str(DOCUMENT_SCHEMA).context("parse document schema")?;
    let compiled = validator_for(&schema).map_err(|err| anyhow!("invalid schema: {}", err))?;
    let messages: Vec<String> = compiled
        .iter_errors(instance)
        .map(|err| err.to_string())
        .collect();
    if !messages.is_empty() {
        bail!("schema validation failed:\n- {}", messages.join("\n- "));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lexicon::Language;
    use crate::document::DocumentOptions;
    use crate::generate::Generator;
    use crate::render::json::render_json;
    use crate::test_support::{RECIPE, fixed_timestamp};

    fn recipe_json() -> String {
        let options = DocumentOptions::new(Language::English, fixed_timestamp());
        let doc = Generator::default()
            .generate(RECIPE, &options)
            .expect("generate");
        render_json(&doc).expect("render")
    }

    #[test]
    fn rendered_document_is_valid() {
        let doc = validate_document_str(&recipe_json()).expect("valid");
        assert_eq!(doc.steps.len(), 3);
    }

    #[test]
    fn schema_rejects_missing_fields() {
        let err = validate_document_str(r#"{"title":"x","steps":[]}"#).expect_err("invalid");
        assert!(err.to_string().contains("schema validation failed"));
    }

    #[test]
    fn invariants_reject_forward_dependency() {
        let mut value: Value = serde_json::from_str(&recipe_json()).expect("parse");
        value["steps"][0]["dependencies"] = serde_json::json!([2]);
        let err = validate_document_str(&value.to_string()).expect_err("invalid");
        assert!(err.to_string().contains("step 1: dependency 2"));
    }

    #[test]
    fn invariants_reject_gapped_ids() {
        let mut value: Value = serde_json::from_str(&recipe_json()).expect("parse");
        value["steps"][1]["id"] = serde_json::json!(5);
        let err = validate_document_str(&value.to_string()).expect_err("invalid");
        assert!(err.to_string().contains("position 2 has id 5"));
    }

    #[test]
    fn validate_file_names_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("doc.json");
        fs::write(&path, "not json").expect("write");
        let err = validate_document_file(&path).expect_err("invalid");
        assert!(format!("{err:#}").contains("doc.json"));
    }
}
