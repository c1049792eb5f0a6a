//! XML serializer for interchange documents.

use std::fmt::Write;

use super::XmlElement;

/// Serializes an element tree to a string, two-space indented, with a
/// trailing newline.
#[must_use]
pub fn to_string(root: &XmlElement) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    write_element(&mut out, root, 0);
    out
}

fn write_element(out: &mut String, element: &XmlElement, depth: usize) {
    let indent = "  ".repeat(depth);
    let _ = write!(out, "{indent}<{}", element.name);
    for (name, value) in &element.attributes {
        let _ = write!(out, " {name}=\"{}\"", escape(value));
    }

    let text = element.text.trim();
    if element.children.is_empty() && text.is_empty() {
        out.push_str("/>\n");
    } else if element.children.is_empty() {
        let _ = writeln!(out, ">{}</{}>", escape(text), element.name);
    } else {
        out.push_str(">\n");
        for child in &element.children {
            write_element(out, child, depth + 1);
        }
        let _ = writeln!(out, "{indent}</{}>", element.name);
    }
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
