//! Element equivalence.
//!
//! Two elements are equivalent when their tag names match exactly and their
//! attributes form the same set of `(name, value)` pairs. Declaration order is
//! irrelevant; values are compared byte for byte. Children are never looked at.

use std::collections::BTreeMap;

use super::node::{XmlChild, XmlElement};

/// Returns true if `a` and `b` have the same tag name and attribute set.
pub fn equivalent(a: &XmlElement, b: &XmlElement) -> bool {
    a.name == b.name && attribute_set(a) == attribute_set(b)
}

fn attribute_set(element: &XmlElement) -> BTreeMap<&str, &str> {
    element
        .attributes
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect()
}

/// Index of the first element in `children` equivalent to `target`.
/// Text and comment children are skipped.
pub fn find_equivalent(children: &[XmlChild], target: &XmlElement) -> Option<usize> {
    children.iter().position(|child| match child {
        XmlChild::Element(element) => equivalent(element, target),
        _ => false,
    })
}
