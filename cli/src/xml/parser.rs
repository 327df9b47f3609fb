//! XML parser that builds owned document trees.
//!
//! Uses quick-xml's streaming reader. Whitespace-only text is discarded so that
//! re-serialising a document always produces the same indentation, whatever the
//! input looked like. Comments are kept; the XML declaration, processing
//! instructions and DOCTYPE are not.

use anyhow::anyhow;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::{debug, trace};

use super::node::{Document, XmlChild, XmlElement};
use crate::core::error::{Result, ScaffoldError};

/// Parses a complete document from a string.
///
/// # Errors
///
/// Returns `ScaffoldError::XmlParse` for structural problems (no root, several
/// roots, unclosed elements, text outside the root) and `ScaffoldError::Xml` for
/// errors reported by the reader itself.
pub fn parse_str(xml: &str) -> Result<Document> {
    let mut reader = Reader::from_str(xml);
    // Text is trimmed by the tree builder, not the reader.
    reader.config_mut().trim_text_start = false;
    reader.config_mut().trim_text_end = false;

    let mut builder = TreeBuilder::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                builder.flush_text()?;
                let element = parse_element(e, &reader)?;
                trace!("open <{}>", element.name);
                builder.open(element)?;
            }
            Ok(Event::Empty(ref e)) => {
                builder.flush_text()?;
                let element = parse_element(e, &reader)?;
                builder.attach(element)?;
            }
            Ok(Event::End(_)) => {
                builder.flush_text()?;
                builder.close()?;
            }
            Ok(Event::Text(ref e)) => {
                let raw = std::str::from_utf8(e.as_ref())
                    .map_err(|err| ScaffoldError::XmlParse(err.to_string()))?;
                let text = unescape(raw).map_err(|err| ScaffoldError::XmlParse(err.to_string()))?;
                builder.text.push_str(&text);
            }
            Ok(Event::CData(ref e)) => {
                builder.text.push_str(&String::from_utf8_lossy(e.as_ref()));
            }
            Ok(Event::GeneralRef(ref e)) => {
                // Entity and character references arrive separately from the text around them.
                let name = std::str::from_utf8(e.as_ref())
                    .map_err(|err| ScaffoldError::XmlParse(err.to_string()))?;
                let reference = format!("&{};", name);
                let resolved = unescape(&reference)
                    .map_err(|err| ScaffoldError::XmlParse(err.to_string()))?;
                builder.text.push_str(&resolved);
            }
            Ok(Event::Comment(ref e)) => {
                builder.flush_text()?;
                builder.comment(String::from_utf8_lossy(e.as_ref()).into_owned());
            }
            Ok(Event::Decl(_)) | Ok(Event::PI(_)) | Ok(Event::DocType(_)) => {}
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(anyhow!(ScaffoldError::Xml { source: e })
                    .context(format!("at byte {}", reader.error_position())));
            }
        }
        buf.clear();
    }

    builder.finish()
}

fn parse_element<R>(e: &BytesStart, reader: &Reader<R>) -> Result<XmlElement> {
    let name = reader
        .decoder()
        .decode(e.name().as_ref())
        .map_err(|err| ScaffoldError::XmlParse(err.to_string()))?
        .into_owned();

    let mut element = XmlElement::new(name);
    for attr_result in e.attributes() {
        let attr =
            attr_result.map_err(|err| ScaffoldError::XmlParse(format!("Attribute error: {}", err)))?;
        let key = reader
            .decoder()
            .decode(attr.key.as_ref())
            .map_err(|err| ScaffoldError::XmlParse(err.to_string()))?
            .into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| ScaffoldError::XmlParse(err.to_string()))?
            .into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

/// Stack-based tree assembly shared by all event arms.
#[derive(Default)]
struct TreeBuilder {
    stack: Vec<XmlElement>,
    root: Option<XmlElement>,
    prolog: Vec<XmlChild>,
    text: String,
}

impl TreeBuilder {
    fn open(&mut self, element: XmlElement) -> Result<()> {
        if self.stack.is_empty() && self.root.is_some() {
            anyhow::bail!(ScaffoldError::XmlParse(format!(
                "Second root element <{}> found",
                element.name
            )));
        }
        self.stack.push(element);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        let element = self
            .stack
            .pop()
            .ok_or_else(|| ScaffoldError::XmlParse("Closing tag without an open element".into()))?;
        self.attach(element)
    }

    /// Adds a finished element to its parent, or makes it the root.
    fn attach(&mut self, element: XmlElement) -> Result<()> {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(XmlChild::Element(element)),
            None if self.root.is_none() => self.root = Some(element),
            None => anyhow::bail!(ScaffoldError::XmlParse(format!(
                "Second root element <{}> found",
                element.name
            ))),
        }
        Ok(())
    }

    fn comment(&mut self, comment: String) {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(XmlChild::Comment(comment)),
            None if self.root.is_none() => self.prolog.push(XmlChild::Comment(comment)),
            None => debug!("Dropping comment after the root element"),
        }
    }

    fn flush_text(&mut self) -> Result<()> {
        let text = std::mem::take(&mut self.text);
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(());
        }
        match self.stack.last_mut() {
            Some(parent) => {
                parent.children.push(XmlChild::Text(trimmed.to_string()));
                Ok(())
            }
            None => Err(anyhow!(ScaffoldError::XmlParse(format!(
                "Text outside the root element: '{}'",
                trimmed
            )))),
        }
    }

    fn finish(mut self) -> Result<Document> {
        self.flush_text()?;
        if let Some(open) = self.stack.last() {
            anyhow::bail!(ScaffoldError::XmlParse(format!(
                "Element <{}> is never closed",
                open.name
            )));
        }
        let root = self
            .root
            .ok_or_else(|| ScaffoldError::XmlParse("Document has no root element".into()))?;
        Ok(Document {
            prolog: self.prolog,
            root,
        })
    }
}
