//! Markdown rendering through a `minijinja` template.

use std::sync::LazyLock;

use anyhow::{Context, Result};
use minijinja::{Environment, context};

use crate::document::{Document, Labels};

const INSTRUCTIONS_TEMPLATE: &str = include_str!("templates/instructions.md");

static ENGINE: LazyLock<Environment<'static>> = LazyLock::new(|| {
    let mut env = Environment::new();
    env.add_template("instructions.md", INSTRUCTIONS_TEMPLATE)
        .expect("instructions template should be valid");
    env
});

/// Render the document as a numbered Markdown list.
pub fn render_markdown(doc: &Document, labels: &Labels) -> Result<String> {
    let template = ENGINE
        .get_template("instructions.md")
        .context("load markdown template")?;
    let mut rendered = template
        .render(context! {
            title => &doc.title,
            description => &doc.description,
            created_at => doc.created_at.to_rfc3339(),
            steps => &doc.steps,
            labels => context! {
                created_caption => labels.created_caption,
                depends_caption => labels.depends_caption,
            },
        })
        .context("render markdown template")?;
    rendered.push('\n');
    Ok(rendered)
}
