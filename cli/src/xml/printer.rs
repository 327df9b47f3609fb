//! Deterministic pretty printer.
//!
//! Output rules:
//! - always starts with `<?xml version="1.0"?>`
//! - one element per line, nested `indent` spaces deeper per level
//! - childless elements self-close (`<module name="Acme_Blog"/>`)
//! - an element whose only child is text is printed on one line
//! - attributes are printed in stored order

use quick_xml::escape::{escape, partial_escape};
use std::fmt::Write;

use super::node::{Document, XmlChild, XmlElement};

/// Serialises a whole document, terminated by a newline.
pub fn print_document(document: &Document, indent: usize) -> String {
    let mut out = String::from("<?xml version=\"1.0\"?>\n");
    for child in &document.prolog {
        write_child(&mut out, child, 0, indent);
    }
    write_element(&mut out, &document.root, 0, indent);
    out
}

/// Serialises a single element subtree starting at column zero.
#[cfg(test)]
pub fn print_element(element: &XmlElement, indent: usize) -> String {
    let mut out = String::new();
    write_element(&mut out, element, 0, indent);
    out
}

fn write_element(out: &mut String, element: &XmlElement, depth: usize, indent: usize) {
    let pad = " ".repeat(depth * indent);
    out.push_str(&pad);
    out.push('<');
    out.push_str(&element.name);
    for (key, value) in &element.attributes {
        // Writing into a String cannot fail.
        let _ = write!(out, " {}=\"{}\"", key, escape(value.as_str()));
    }

    match element.children.as_slice() {
        [] => out.push_str("/>\n"),
        [XmlChild::Text(text)] => {
            let _ = writeln!(out, ">{}</{}>", partial_escape(text.as_str()), element.name);
        }
        children => {
            out.push_str(">\n");
            for child in children {
                write_child(out, child, depth + 1, indent);
            }
            let _ = writeln!(out, "{}</{}>", pad, element.name);
        }
    }
}

fn write_child(out: &mut String, child: &XmlChild, depth: usize, indent: usize) {
    match child {
        XmlChild::Element(element) => write_element(out, element, depth, indent),
        XmlChild::Text(text) => {
            let _ = writeln!(
                out,
                "{}{}",
                " ".repeat(depth * indent),
                partial_escape(text.as_str())
            );
        }
        XmlChild::Comment(comment) => {
            let _ = writeln!(out, "{}<!--{}-->", " ".repeat(depth * indent), comment);
        }
    }
}
