//! Interchange document model.
//!
//! The wire format is a small XML subset: attribute-bearing elements nested
//! under a root, no namespaces, no CDATA. Documents are parsed and built
//! whole in memory; there is no streaming path.

pub mod parser;
pub mod writer;

use std::fs;
use std::path::Path;

use crate::error::Result;

/// A single element of an interchange document.
#[derive(Debug, Clone, Default)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlElement>,
    /// Concatenated character data directly inside this element.
    pub text: String,
}

impl XmlElement {
    /// Creates an empty element with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets an attribute, replacing any existing value of the same name.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(existing) = self.attributes.iter_mut().find(|(n, _)| *n == name) {
            existing.1 = value;
        } else {
            self.attributes.push((name, value));
        }
    }

    /// Returns the value of an attribute, if present.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the first child with the given name, if any.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Iterates over all children with the given name, in document order.
    pub fn children_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Appends a child element.
    pub fn push_child(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    /// Returns whether the element has any children.
    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Loads and parses an interchange document from a file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not well-formed; this is
/// a terminal failure for the whole call, not a per-element one.
pub fn load(path: &Path) -> Result<XmlElement> {
    let content = fs::read_to_string(path).map_err(crate::error::DocumentError::Io)?;
    parser::parse(&content)
}

/// Serializes a document and writes it to a file in one operation.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save(root: &XmlElement, path: &Path) -> Result<()> {
    let content = writer::to_string(root);
    fs::write(path, content).map_err(crate::error::DocumentError::Io)?;
    Ok(())
}
