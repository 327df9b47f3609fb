//! # Content Fragments
//!
//! File: cli/src/xml/fragment.rs
//!
//! ## Overview
//!
//! A `ContentFragment` is the nested description of the XML a command wants to
//! add to a configuration file: each node has a name, ordered attributes and a
//! value that is empty, text, nested children, or an indexed list of repeated
//! siblings. `FragmentBuilder` renders a node into an `XmlElement`.
//!
//! ## Indexed items
//!
//! `FragmentValue::Items` entries are all rendered under the builder's indexed
//! item tag, whatever their own name is. The default tag is `item`; the module
//! descriptor uses `module` so that a dependency list becomes
//! `<sequence><module name="..."/>...</sequence>`.
//!
//! ## Examples
//!
//! ```rust
//! let fragment = ContentFragment::single(
//!     FragmentNode::new("router").attr("id", "standard").child(
//!         FragmentNode::new("route")
//!             .attr("id", "blog")
//!             .attr("frontName", "blog")
//!             .child(FragmentNode::new("module").attr("name", "Acme_Blog")),
//!     ),
//! );
//! let element = FragmentBuilder::default().render_first(&fragment);
//! ```
//!
use std::path::Path;

use super::node::{XmlChild, XmlElement};
use super::parser;
use crate::common::fs::io;
use crate::core::error::Result;

/// Tag used for indexed items when no other name is configured.
pub const DEFAULT_INDEXED_ITEM_NAME: &str = "item";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentValue {
    /// Leaf element without children.
    Empty,
    /// Leaf element with character data.
    Text(String),
    /// Nested named children.
    Children(Vec<FragmentNode>),
    /// Repeated siblings rendered under the indexed item tag.
    Items(Vec<FragmentNode>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentNode {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub value: FragmentValue,
}

impl FragmentNode {
    pub fn new(name: impl Into<String>) -> Self {
        FragmentNode {
            name: name.into(),
            attributes: Vec::new(),
            value: FragmentValue::Empty,
        }
    }

    /// An indexed list entry. Its name is replaced by the builder's item tag.
    pub fn item() -> Self {
        FragmentNode::new("")
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Adds the attribute only when `value` is `Some`.
    pub fn attr_opt(self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.attr(key, value),
            None => self,
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.value = FragmentValue::Text(text.into());
        self
    }

    /// Appends a named child, turning a leaf into a parent.
    pub fn child(mut self, node: FragmentNode) -> Self {
        match &mut self.value {
            FragmentValue::Children(children) => children.push(node),
            _ => self.value = FragmentValue::Children(vec![node]),
        }
        self
    }

    /// Replaces the value with an indexed list. An empty list leaves the node a leaf.
    pub fn items(mut self, items: Vec<FragmentNode>) -> Self {
        self.value = if items.is_empty() {
            FragmentValue::Empty
        } else {
            FragmentValue::Items(items)
        };
        self
    }

    /// Converts a parsed element back into the fragment model.
    /// Comments are dropped; text is kept only on elements without element children.
    pub fn from_element(element: &XmlElement) -> Self {
        let children: Vec<FragmentNode> =
            element.child_elements().map(FragmentNode::from_element).collect();
        let value = if !children.is_empty() {
            FragmentValue::Children(children)
        } else if let Some(text) = element.text() {
            FragmentValue::Text(text)
        } else {
            FragmentValue::Empty
        };
        FragmentNode {
            name: element.name.clone(),
            attributes: element.attributes.clone(),
            value,
        }
    }
}

/// Ordered set of top-level fragment entries. Merging uses the first one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentFragment {
    pub entries: Vec<FragmentNode>,
}

impl ContentFragment {
    pub fn empty() -> Self {
        ContentFragment::default()
    }

    pub fn single(node: FragmentNode) -> Self {
        ContentFragment {
            entries: vec![node],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn first(&self) -> Option<&FragmentNode> {
        self.entries.first()
    }

    /// Reads a fragment from an XML snippet; the snippet's root element becomes the entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the snippet is not well-formed XML with a single root.
    pub fn from_xml_str(xml: &str) -> Result<Self> {
        let document = parser::parse_str(xml)?;
        Ok(ContentFragment::single(FragmentNode::from_element(
            &document.root,
        )))
    }

    /// Reads a fragment from an XML snippet file.
    pub fn from_file(path: &Path) -> Result<Self> {
        ContentFragment::from_xml_str(&io::read_file_to_string(path)?)
    }
}

/// Renders fragment nodes into XML elements.
#[derive(Debug, Clone)]
pub struct FragmentBuilder {
    indexed_item_name: String,
}

impl Default for FragmentBuilder {
    fn default() -> Self {
        FragmentBuilder::new(DEFAULT_INDEXED_ITEM_NAME)
    }
}

impl FragmentBuilder {
    pub fn new(indexed_item_name: impl Into<String>) -> Self {
        FragmentBuilder {
            indexed_item_name: indexed_item_name.into(),
        }
    }

    pub fn render(&self, node: &FragmentNode) -> XmlElement {
        self.render_named(&node.name, node)
    }

    /// Renders the first entry of `fragment`, if there is one.
    pub fn render_first(&self, fragment: &ContentFragment) -> Option<XmlElement> {
        fragment.first().map(|node| self.render(node))
    }

    fn render_named(&self, name: &str, node: &FragmentNode) -> XmlElement {
        let mut element = XmlElement::new(name);
        element.attributes = node.attributes.clone();
        match &node.value {
            FragmentValue::Empty => {}
            FragmentValue::Text(text) => element.children.push(XmlChild::Text(text.clone())),
            FragmentValue::Children(children) => {
                for child in children {
                    element.children.push(XmlChild::Element(self.render(child)));
                }
            }
            FragmentValue::Items(items) => {
                for item in items {
                    element
                        .children
                        .push(XmlChild::Element(self.render_named(&self.indexed_item_name, item)));
                }
            }
        }
        element
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::printer::print_element;

    #[test]
    fn test_render_nested_route() {
        let node = FragmentNode::new("router").attr("id", "standard").child(
            FragmentNode::new("route")
                .attr("id", "blog")
                .attr("frontName", "blog")
                .child(FragmentNode::new("module").attr("name", "Acme_Blog")),
        );
        let rendered = FragmentBuilder::default().render(&node);
        assert_eq!(
            print_element(&rendered, 4),
            "<router id=\"standard\">\n    <route id=\"blog\" frontName=\"blog\">\n        <module name=\"Acme_Blog\"/>\n    </route>\n</router>\n"
        );
    }

    #[test]
    fn test_render_indexed_items_use_builder_tag() {
        let node = FragmentNode::new("sequence").items(vec![
            FragmentNode::item().attr("name", "Magento_Catalog"),
            FragmentNode::new("ignored").attr("name", "Magento_Store"),
        ]);
        let rendered = FragmentBuilder::new("module").render(&node);
        let names: Vec<_> = rendered.child_elements().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["module", "module"]);
        assert_eq!(
            rendered.child_elements().nth(1).and_then(|e| e.attribute("name")),
            Some("Magento_Store")
        );

        let default_tag = FragmentBuilder::default().render(&node);
        assert_eq!(default_tag.first_child_element().unwrap().name, "item");
    }

    #[test]
    fn test_empty_items_render_leaf() {
        let node = FragmentNode::new("sequence").items(Vec::new());
        assert_eq!(node.value, FragmentValue::Empty);
    }

    #[test]
    fn test_attr_opt_and_text() {
        let node = FragmentNode::new("observer")
            .attr("name", "o")
            .attr_opt("disabled", Some("true"))
            .attr_opt("shared", None::<&str>);
        assert_eq!(node.attributes.len(), 2);

        let schedule = FragmentBuilder::default().render(&FragmentNode::new("schedule").text("0 * * * *"));
        assert_eq!(schedule.text().as_deref(), Some("0 * * * *"));
    }

    #[test]
    fn test_from_xml_snippet() {
        let fragment = ContentFragment::from_xml_str(
            "<referenceContainer name=\"content\"><block class=\"Magento\\Framework\\View\\Element\\Template\" name=\"blog.list\"/><!-- note --></referenceContainer>",
        )
        .unwrap();
        let first = fragment.first().unwrap();
        assert_eq!(first.name, "referenceContainer");
        match &first.value {
            FragmentValue::Children(children) => {
                assert_eq!(children.len(), 1);
                assert_eq!(children[0].name, "block");
                assert_eq!(children[0].value, FragmentValue::Empty);
            }
            other => panic!("unexpected value {:?}", other),
        }
    }

    #[test]
    fn test_from_invalid_snippet_fails() {
        assert!(ContentFragment::from_xml_str("<a><b></a>").is_err());
        assert!(ContentFragment::from_xml_str("").is_err());
    }
}
