//! # XML Merge Engine
//!
//! File: cli/src/xml/merge.rs
//!
//! ## Overview
//!
//! Grafts a generated fragment into an existing configuration document. The
//! engine only ever adds nodes: it never deletes, reorders or rewrites what is
//! already there.
//!
//! ## Algorithm
//!
//! 1. Render the first fragment entry into an element (the cursor).
//! 2. Look for the first element among the document root's children that is
//!    equivalent to the cursor (same tag, same attribute set; text is skipped).
//! 3. On a match, move the cursor to its own first child element and repeat
//!    inside the matched element.
//! 4. When no equivalent element exists at the current level, append the cursor
//!    (with everything below it) to the element being searched.
//! 5. When the cursor runs out of child elements before a mismatch is found, the
//!    whole fragment already exists and nothing is grafted.
//!
//! Each step consumes one level of the owned fragment, so the descent is bounded
//! by the fragment depth and always terminates.
//!
//! ## Results
//!
//! - `Grafted`: the document changed (and, for `merge_file`, was saved).
//! - `NoContent`: empty fragment, or every level already present. No write happens.
//! - `WriteFailed`: the document changed in memory but saving it failed.
//!
use std::path::Path;

use tracing::{debug, info, warn};

use super::compare::find_equivalent;
use super::fragment::{ContentFragment, FragmentBuilder};
use super::node::{Document, XmlChild, XmlElement};
use crate::core::error::Result;

/// Outcome of a merge request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeResult {
    Grafted,
    NoContent,
    WriteFailed(String),
}

/// Settings for `merge_file`.
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Spaces per nesting level when the document is written back.
    pub indent: usize,
    /// Renders the fragment; carries the indexed item tag.
    pub builder: FragmentBuilder,
}

impl Default for MergeOptions {
    fn default() -> Self {
        MergeOptions {
            indent: 4,
            builder: FragmentBuilder::default(),
        }
    }
}

/// Merges the first entry of `fragment` into `document` in memory.
///
/// # Arguments
///
/// * `document` - The loaded target document. Mutated only on `Grafted`.
/// * `fragment` - The content to add.
/// * `builder` - Renders the fragment entry into an element.
pub fn merge(
    document: &mut Document,
    fragment: &ContentFragment,
    builder: &FragmentBuilder,
) -> MergeResult {
    let Some(cursor) = builder.render_first(fragment) else {
        debug!("Merge requested with an empty fragment");
        return MergeResult::NoContent;
    };
    if graft(&mut document.root, cursor) {
        MergeResult::Grafted
    } else {
        MergeResult::NoContent
    }
}

/// Descends into `parent` following `cursor`; returns true if something was appended.
fn graft(parent: &mut XmlElement, cursor: XmlElement) -> bool {
    let destination = find_equivalent(&parent.children, &cursor)
        .and_then(|index| parent.children.get_mut(index))
        .and_then(XmlChild::as_element_mut);

    match destination {
        Some(matched) => {
            debug!("Matched existing <{}>, descending", matched.name);
            let ignored = cursor.child_elements().count().saturating_sub(1);
            if ignored > 0 {
                warn!(
                    "<{}> already exists; only its first child element is merged, {} sibling(s) ignored",
                    cursor.name, ignored
                );
            }
            match cursor.into_first_child_element() {
                Some(next) => graft(matched, next),
                None => false,
            }
        }
        None => {
            debug!("Grafting <{}> under <{}>", cursor.name, parent.name);
            parent.children.push(XmlChild::Element(cursor));
            true
        }
    }
}

/// Loads `path`, merges `fragment` into it and saves it if anything changed.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed. A failed save is not an
/// error; it is reported as `MergeResult::WriteFailed`.
pub fn merge_file(
    path: &Path,
    fragment: &ContentFragment,
    options: &MergeOptions,
) -> Result<MergeResult> {
    merge_into(path, path, fragment, options)
}

/// Like `merge_file`, but writes the merged document to `destination`.
pub fn merge_into(
    source: &Path,
    destination: &Path,
    fragment: &ContentFragment,
    options: &MergeOptions,
) -> Result<MergeResult> {
    if fragment.is_empty() {
        return Ok(MergeResult::NoContent);
    }
    let mut document = Document::load(source)?;
    match merge(&mut document, fragment, &options.builder) {
        MergeResult::Grafted => match document.save(destination, options.indent) {
            Ok(()) => {
                info!("Merged fragment into {}", destination.display());
                Ok(MergeResult::Grafted)
            }
            Err(e) => Ok(MergeResult::WriteFailed(format!("{:#}", e))),
        },
        other => Ok(other),
    }
}
