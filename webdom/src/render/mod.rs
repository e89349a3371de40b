//! HTML serialization of an element tree.

mod escape;

pub use escape::{escape_attr, escape_text};

use log::trace;

use crate::element::{is_void_tag, Content, Element};

/// Serialize `root` as compact HTML.
pub fn to_html(root: &Element) -> String {
    let mut out = String::new();
    write_element(root, &mut out, None);
    trace!("rendered <{}> into {} bytes", root.tag, out.len());
    out
}

/// Serialize `root` with one element per line, indented by two spaces per level.
///
/// Elements whose content is plain text stay on a single line.
pub fn to_html_pretty(root: &Element) -> String {
    let mut out = String::new();
    write_element(root, &mut out, Some(0));
    out
}

fn write_element(element: &Element, out: &mut String, depth: Option<usize>) {
    if let Some(depth) = depth {
        indent(out, depth);
    }

    write_open_tag(element, out);

    if is_void_tag(element.tag) {
        if depth.is_some() {
            out.push('\n');
        }
        return;
    }

    match &element.content {
        Content::None => {}
        Content::Text(text) => out.push_str(&escape_text(text)),
        Content::Children(children) => {
            if depth.is_some() {
                out.push('\n');
            }
            for child in children {
                write_element(child, out, depth.map(|d| d + 1));
            }
            if let Some(depth) = depth {
                indent(out, depth);
            }
        }
    }

    out.push_str("</");
    out.push_str(element.tag);
    out.push('>');
    if depth.is_some() {
        out.push('\n');
    }
}

fn write_open_tag(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(element.tag);

    if let Some(id) = &element.id {
        push_attr(out, "id", id);
    }
    if !element.classes.is_empty() {
        push_attr(out, "class", &element.classes.join(" "));
    }
    for (name, value) in &element.attrs {
        push_attr(out, name, value);
    }
    for (key, value) in &element.data {
        push_attr(out, &format!("data-{key}"), value);
    }
    for flag in &element.flags {
        out.push(' ');
        out.push_str(flag);
    }

    if is_void_tag(element.tag) {
        out.push_str(" />");
    } else {
        out.push('>');
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_attr(value));
    out.push('"');
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}
