//! # magescaff XML Layer
//!
//! File: cli/src/xml/mod.rs
//!
//! ## Overview
//!
//! The XML layer holds everything needed to load a Magento configuration file,
//! graft a generated fragment into it, and write it back with stable formatting.
//!
//! ## Architecture
//!
//! - **`node`**: the owned document tree (`Document`, `XmlElement`, `XmlChild`).
//! - **`parser`**: builds a `Document` from text with `quick-xml`'s streaming reader.
//! - **`printer`**: deterministic pretty printer used for every write.
//! - **`compare`**: element equivalence (tag name + attribute set, order independent).
//! - **`fragment`**: the content model commands build (`ContentFragment`) and the
//!   `FragmentBuilder` that renders it into elements.
//! - **`merge`**: the graft algorithm and the load/merge/save wrapper.
//!
//! Data flows one way: a command builds a `ContentFragment`, the builder renders it,
//! `merge` walks the loaded document and grafts the unmatched remainder, and the
//! printer serialises the result.
//!
pub mod compare;
pub mod fragment;
pub mod merge;
pub mod node;
pub mod parser;
pub mod printer;

pub use fragment::{ContentFragment, FragmentBuilder, FragmentNode};
pub use merge::{merge_file, MergeOptions, MergeResult};
pub use node::{Document, XmlElement};

/// Namespace declaration placed on every generated configuration root.
pub const XSI_NAMESPACE_ATTRIBUTE: &str = "xmlns:xsi";
/// Value of the `xmlns:xsi` declaration.
pub const XSI_NAMESPACE_URI: &str = "http://www.w3.org/2001/XMLSchema-instance";
/// Attribute carrying the schema URN on a configuration root.
pub const SCHEMA_LOCATION_ATTRIBUTE: &str = "xsi:noNamespaceSchemaLocation";

/// Builds the minimal schema-declaring root element for a new configuration file.
///
/// # Arguments
///
/// * `root_node` - Root tag name (e.g. `config`, `page`).
/// * `urn` - Schema URN for `xsi:noNamespaceSchemaLocation`.
pub fn schema_root(root_node: &str, urn: &str) -> XmlElement {
    XmlElement::new(root_node)
        .with_attribute(XSI_NAMESPACE_ATTRIBUTE, XSI_NAMESPACE_URI)
        .with_attribute(SCHEMA_LOCATION_ATTRIBUTE, urn)
}
