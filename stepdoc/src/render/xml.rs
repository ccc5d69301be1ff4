//! XML rendering with `quick-xml`.

use anyhow::{Context, Result};
use quick_xml::Writer;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::document::{Document, Labels, StepNode};

/// Render the document as an indented XML string with declaration.
pub fn render_xml(doc: &Document, labels: &Labels) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .context("write xml declaration")?;

    let created_at = doc.created_at.to_rfc3339();
    let mut root = BytesStart::new(labels.root);
    root.push_attribute((labels.title_attr, doc.title.as_str()));
    root.push_attribute((labels.created_attr, created_at.as_str()));
    writer
        .write_event(Event::Start(root))
        .context("write root element")?;

    write_text_element(&mut writer, labels.description, &doc.description)?;

    writer
        .write_event(Event::Start(BytesStart::new(labels.steps)))
        .context("open steps element")?;
    for step in &doc.steps {
        write_step(&mut writer, labels, step)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(labels.steps)))
        .context("close steps element")?;

    writer
        .write_event(Event::End(BytesEnd::new(labels.root)))
        .context("close root element")?;

    let mut out = String::from_utf8(writer.into_inner()).context("xml output is not utf-8")?;
    out.push('\n');
    Ok(out)
}

fn write_step(writer: &mut Writer<Vec<u8>>, labels: &Labels, step: &StepNode) -> Result<()> {
    let id = step.id.to_string();
    let mut start = BytesStart::new(labels.step);
    start.push_attribute((labels.id_attr, id.as_str()));
    writer
        .write_event(Event::Start(start))
        .with_context(|| format!("open step {id}"))?;

    write_text_element(writer, labels.step_title, &step.title)?;
    write_text_element(writer, labels.details, &step.details)?;

    if step.dependencies.is_empty() {
        writer
            .write_event(Event::Empty(BytesStart::new(labels.dependencies)))
            .with_context(|| format!("write dependencies of step {id}"))?;
    } else {
        writer
            .write_event(Event::Start(BytesStart::new(labels.dependencies)))
            .with_context(|| format!("open dependencies of step {id}"))?;
        for dep in &step.dependencies {
            write_text_element(writer, labels.step_ref, &dep.to_string())?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(labels.dependencies)))
            .with_context(|| format!("close dependencies of step {id}"))?;
    }

    writer
        .write_event(Event::End(BytesEnd::new(labels.step)))
        .with_context(|| format!("close step {id}"))?;
    Ok(())
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .with_context(|| format!("open <{name}>"))?;
    writer
        .write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))
        .with_context(|| format!("write <{name}> text"))?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .with_context(|| format!("close <{name}>"))?;
    Ok(())
}
