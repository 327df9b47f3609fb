//! Owned XML document tree.
//!
//! Attributes keep their declaration order so that a load/save cycle does not
//! reshuffle a hand-written file. Equivalence checks that ignore the order live
//! in `xml::compare`.

use crate::common::fs::io;
use crate::core::error::Result;
use anyhow::Context;
use std::path::Path;
use tracing::debug;

use super::{parser, printer};

/// One child of an element: a nested element, character data, or a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlChild {
    Element(XmlElement),
    Text(String),
    Comment(String),
}

impl XmlChild {
    pub fn as_element(&self) -> Option<&XmlElement> {
        match self {
            XmlChild::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut XmlElement> {
        match self {
            XmlChild::Element(element) => Some(element),
            _ => None,
        }
    }
}

/// An element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlChild>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        XmlElement {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Builder-style child appender.
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(XmlChild::Element(child));
        self
    }

    /// Sets an attribute, replacing the value in place if the key already exists.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    /// Iterates over element children only, skipping text and comments.
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(XmlChild::as_element)
    }

    /// Consumes the element and returns its first element child.
    pub fn into_first_child_element(self) -> Option<XmlElement> {
        self.children.into_iter().find_map(|child| match child {
            XmlChild::Element(element) => Some(element),
            _ => None,
        })
    }

    /// Concatenated text content of the direct text children, if any.
    pub fn text(&self) -> Option<String> {
        let text: String = self
            .children
            .iter()
            .filter_map(|child| match child {
                XmlChild::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[cfg(test)]
impl XmlElement {
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn first_child_element(&self) -> Option<&XmlElement> {
        self.child_elements().next()
    }

    /// Total number of elements in this subtree, including `self`.
    pub fn element_count(&self) -> usize {
        1 + self
            .child_elements()
            .map(XmlElement::element_count)
            .sum::<usize>()
    }
}

/// A parsed XML file: leading comments plus the single root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub prolog: Vec<XmlChild>,
    pub root: XmlElement,
}

impl Document {
    pub fn new(root: XmlElement) -> Self {
        Document {
            prolog: Vec::new(),
            root,
        }
    }

    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not well-formed XML.
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading XML document {}", path.display());
        let content = io::read_file_to_string(path)?;
        parser::parse_str(&content)
            .with_context(|| format!("Failed to parse XML file {}", path.display()))
    }

    /// Serialises the document with the given indent width.
    pub fn to_xml_string(&self, indent: usize) -> String {
        printer::print_document(self, indent)
    }

    /// Pretty prints the document and overwrites `path` with it.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the write fails.
    pub fn save(&self, path: &Path, indent: usize) -> Result<()> {
        io::write_string_to_file(path, &self.to_xml_string(indent))
    }
}
